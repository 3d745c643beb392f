//! Predict cardiovascular risk for a sample patient
//!
//! Uses `CARDIO__ARTIFACT_PATH` (or `config/cardio.*`) when set, otherwise the
//! reference artifact shipped with the tests:
//!
//! ```text
//! cargo run -p cardio-sdk --example predict
//! CARDIO__LOG_LEVEL=debug cargo run -p cardio-sdk --example predict
//! RUST_LOG=cardio_sdk=debug cargo run -p cardio-sdk --example predict
//! ```

use anyhow::Result;
use cardio_sdk::{PatientInput, PredictionServiceBuilder, ServiceConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let mut config = ServiceConfig::load()?;
    init_tracing(&config)?;

    if config.artifact_path.is_none() {
        config = config.with_artifact_path(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/logistic_v1.json"
        ));
    }
    info!("Loaded configuration: {:?}", config);

    let service = PredictionServiceBuilder::from_config(config).build()?;

    let patient = PatientInput::new(55, "male", 175.0, 85.0, 150, 95)
        .with_cholesterol("above_normal")
        .with_lifestyle(true, false, false);

    let result = service.predict(&patient)?;

    println!("{}", result.explanation.headline);
    println!("{}", result.explanation.message);
    println!(
        "Probability: {:.1}% ({} risk, model {})",
        result.percentage(),
        result.risk_tier,
        result.model_version
    );
    for insight in &result.explanation.insights {
        println!("  - {}", insight.message());
    }
    for factor in &result.explanation.top_factors {
        println!("  + {:<26} {:+.3}", factor.feature, factor.contribution);
    }

    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(metrics) = service.metrics() {
        info!(snapshot = %serde_json::to_string(&metrics.snapshot())?, "Metrics");
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured `log_level`
fn init_tracing(config: &ServiceConfig) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
