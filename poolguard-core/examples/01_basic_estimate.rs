//! Basic Chlorine Estimation Example
//!
//! Shows how PoolGuard turns pH and ORP readings into a free chlorine
//! estimate, and how the tagged outcome separates a dead probe from a
//! genuinely low reading.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_estimate
//! ```

use poolguard_core::{BandThresholds, ChlorineEstimate, ChlorineEstimator, Reading};

fn main() {
    println!("PoolGuard Chlorine Estimation Example");
    println!("=====================================\n");

    let estimator = ChlorineEstimator::standard();
    let bands = BandThresholds::default();

    let readings = [
        ("Main pool", Reading::new(7.2, 720.0)),
        ("Kids pool", Reading::new(7.4, 740.0)),
        ("Olympic", Reading::new(7.1, 780.0)),
        ("Spa", Reading::new(7.3, 680.0)),
        ("Shock treatment", Reading::new(7.5, 975.0)),
        ("Probe unplugged", Reading::new(7.4, 0.0)),
        ("Green water", Reading::new(7.6, 320.0)),
    ];

    println!("{:<16} {:>5} {:>7} {:>7}  {:<12} band", "pool", "pH", "ORP", "ppm", "source");
    for (name, reading) in readings {
        let outcome = estimator.assess_reading(reading);
        let source = match outcome {
            ChlorineEstimate::NoSignal => "no signal",
            ChlorineEstimate::BelowRange => "below range",
            ChlorineEstimate::Saturated => "saturated",
            ChlorineEstimate::Extrapolated { .. } => "extrapolated",
            ChlorineEstimate::Interpolated { .. } => "interpolated",
            ChlorineEstimate::AboveCurve { .. } => "curve max",
        };
        let band = bands
            .classify_chlorine(&outcome)
            .map(|band| format!("{:?}", band))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<16} {:>5.1} {:>7.0} {:>7.1}  {:<12} {}",
            name,
            reading.ph,
            reading.orp_mv,
            outcome.ppm(),
            source,
            band
        );
    }

    println!("\nORP sweep at pH 7.4:");
    let mut orp = 400.0;
    while orp <= 950.0 {
        println!("  {:>4.0} mV -> {:.1} ppm", orp, estimator.estimate(7.4, orp));
        orp += 50.0;
    }
}
