//! Blur and distance commands

use super::{header, print_json};
use crate::Format;
use anyhow::Result;
use owo_colors::OwoColorize;
use photospot_core::Error as CoreError;
use photospot_geo::{distance_km, distance_meters, BlurSettings, GeoPoint, PhotoLocationPair};
use photospot_telemetry::timed_span;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

/// Draw `count` public points for one exact location.
pub fn blur(lon: f64, lat: f64, radius: u32, seed: Option<u64>, count: usize, format: Format) -> Result<()> {
    timed_span!("blur", radius, count);

    let exact = GeoPoint::try_new(lon, lat).map_err(CoreError::from)?;
    let settings = BlurSettings::with_radius(radius).map_err(CoreError::from)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut draws = Vec::with_capacity(count);
    for _ in 0..count {
        let pair = PhotoLocationPair::create(exact, &settings, &mut rng).map_err(CoreError::from)?;
        let public = pair.public();
        draws.push((public, distance_meters(&exact, &public)));
    }

    match format {
        Format::Json => print_json(&json!({
            "exact": exact,
            "radius_meters": radius,
            "points": draws
                .iter()
                .map(|(point, moved)| json!({ "location": point, "offset_meters": moved }))
                .collect::<Vec<_>>(),
        })),
        Format::Text => {
            header("Blurred location");
            println!("  exact:   {}", exact.to_string().dimmed());
            println!("  radius:  {radius} m");
            for (public, moved) in &draws {
                println!("  public:  {}  {}", public.to_string().green(), format!("{moved:.1} m").dimmed());
            }
            println!();
            Ok(())
        }
    }
}

/// Print the great-circle distance between two points.
pub fn distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64, format: Format) -> Result<()> {
    let a = GeoPoint::try_new(lon1, lat1).map_err(CoreError::from)?;
    let b = GeoPoint::try_new(lon2, lat2).map_err(CoreError::from)?;
    let meters = distance_meters(&a, &b);

    match format {
        Format::Json => print_json(&json!({
            "from": a,
            "to": b,
            "meters": meters,
            "kilometers": distance_km(&a, &b),
        })),
        Format::Text => {
            if meters >= 1000.0 {
                println!("{} → {}: {}", a, b, format!("{:.3} km", distance_km(&a, &b)).green().bold());
            } else {
                println!("{} → {}: {}", a, b, format!("{meters:.1} m").green().bold());
            }
            Ok(())
        }
    }
}
