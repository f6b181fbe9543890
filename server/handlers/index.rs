/// Upload page served at `GET /`, compiled into the binary.
pub const PAGE: &str = include_str!("../assets/index.html");
