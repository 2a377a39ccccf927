//! Classify Image Example
//!
//! Runs the forgery classifier on a single image and prints the verdict.
//!
//! Run with: cargo run --example classify_image -- <image_path> [model_path]

use forgery_detector::{
    DEFAULT_MODEL_PATH, DetectorConfig, ForgeryDetector, Verdict, error::Result,
    report::JsonReport,
};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Forgery Detector - Classify Image Example");
        println!("==========================================");
        println!();
        let program = args.first().map_or("classify_image", String::as_str);
        println!("Usage: {} <image_path> [model_path]", program);
        println!();
        println!("Arguments:");
        println!("  image_path  - Path to the image to classify");
        println!("  model_path  - Optional ONNX model (default: {})", DEFAULT_MODEL_PATH);
        return Ok(());
    }

    let image_path = &args[1];
    let model_path = args.get(2).map(|s| s.as_str()).unwrap_or(DEFAULT_MODEL_PATH);

    if !Path::new(image_path).exists() {
        eprintln!("Error: Image file '{}' not found", image_path);
        std::process::exit(1);
    }

    println!("Loading model from {}...", model_path);
    let detector = match ForgeryDetector::load(DetectorConfig::default().with_model_path(model_path)) {
        Ok(detector) => detector,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    println!("Classifying {}...", image_path);
    let result = detector.classify_path(image_path)?;

    match result.verdict() {
        Verdict::Authentic => println!("The image appears to be authentic."),
        Verdict::Manipulated => println!("The image might be a forged image."),
    }
    println!(
        "{:?} confidence: {}%",
        result.confidence_band(),
        result.confidence_percent()
    );
    println!();

    match JsonReport::from(&result).to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize report: {}", e),
    }

    Ok(())
}
