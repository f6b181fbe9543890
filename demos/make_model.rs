use ferrite_classify::{ActivationFunction, Classifier, InputType, ModelMetadata, Network};

/// Writes an untrained 64x64 RGB two-class model with full metadata, for
/// smoke-testing the server without a real checkpoint.
///
///   cargo run --example make_model -- plant_growth_model.json
fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "plant_growth_model.json".to_owned());
    let (width, height) = (64u32, 64u32);

    let network = Network::new(vec![
        (32, (width * height * 3) as usize, ActivationFunction::ReLU),
        (2, 32, ActivationFunction::Softmax),
    ])
    .with_metadata(ModelMetadata {
        description: Some("Untrained plant growth classifier (random weights)".into()),
        input_type: Some(InputType::ImageRgb { width, height }),
        output_labels: Some(vec!["healthy_".into(), "unhealthy_".into()]),
    });

    if let Err(e) = Classifier::from_network(network.clone(), &[]) {
        eprintln!("generated model is invalid: {}", e);
        std::process::exit(1);
    }

    match network.save_json(&path) {
        Ok(()) => println!("Wrote {} ({}x{} RGB -> {} classes)", path, width, height, 2),
        Err(e) => {
            eprintln!("could not write {}: {}", path, e);
            std::process::exit(1);
        }
    }
}
