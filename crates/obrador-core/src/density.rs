//! # Substance Densities
//!
//! The only cross-category conversion path: weight↔volume through a fixed
//! density table. The table is keyed by ingredient *name* (lower-cased),
//! not by unit — density is a property of the substance, so "harina" in a
//! cup and "harina" in grams share one entry.
//!
//! Densities are approximate kitchen averages in g/ml.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::types::Measurement;
use crate::units::convert;

/// Density in grams per milliliter, keyed by lower-cased ingredient name.
///
/// Loaded once at first use; process-wide immutable data.
static DENSITY_G_PER_ML: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut d = HashMap::new();

    d.insert("harina", 0.57);
    d.insert("azúcar", 0.85);
    d.insert("azucar", 0.85);
    d.insert("azúcar glass", 0.56);
    d.insert("mantequilla", 0.96);
    d.insert("agua", 1.0);
    d.insert("leche", 1.03);
    d.insert("aceite", 0.92);
    d.insert("miel", 1.42);
    d.insert("sal", 1.2);
    d.insert("cacao", 0.52);
    d.insert("levadura", 0.95);
    d.insert("crema", 1.01);
    d.insert("avena", 0.41);
    d.insert("maicena", 0.54);

    d
});

/// Looks up the density for an ingredient name (case-insensitive).
pub fn density_of(ingredient_name: &str) -> Option<f64> {
    DENSITY_G_PER_ML
        .get(ingredient_name.to_lowercase().as_str())
        .copied()
}

/// Converts a weight measurement to milliliters using the ingredient's
/// density. `None` when the substance has no density entry or the
/// measurement is not a weight.
///
/// ## Example
/// ```rust
/// use obrador_core::density::convert_weight_to_volume;
/// use obrador_core::types::Measurement;
///
/// // 570 g of harina at 0.57 g/ml = 1000 ml
/// let flour = Measurement::new(570.0, "g");
/// let ml = convert_weight_to_volume(&flour, "harina").unwrap();
/// assert!((ml.value - 1000.0).abs() < 1e-9);
/// ```
pub fn convert_weight_to_volume(
    measurement: &Measurement,
    ingredient_name: &str,
) -> Option<Measurement> {
    let density = density_of(ingredient_name)?;
    let grams = convert(measurement, "g")?;
    Some(Measurement::new(grams.value / density, "ml"))
}

/// Converts a volume measurement to grams using the ingredient's density.
/// `None` when the substance has no density entry or the measurement is
/// not a volume.
pub fn convert_volume_to_weight(
    measurement: &Measurement,
    ingredient_name: &str,
) -> Option<Measurement> {
    let density = density_of(ingredient_name)?;
    let ml = convert(measurement, "ml")?;
    Some(Measurement::new(ml.value * density, "g"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_close;

    #[test]
    fn test_weight_to_volume_normalizes_first() {
        // 1 kg of agua (density 1.0) → 1000 ml
        let water = Measurement::new(1.0, "kg");
        let ml = convert_weight_to_volume(&water, "Agua").unwrap();
        assert_close(ml.value, 1000.0, 1e-9);
        assert_eq!(ml.unit, "ml");
    }

    #[test]
    fn test_volume_to_weight_normalizes_first() {
        // 1 cup of leche: 236.588 ml × 1.03 g/ml
        let milk = Measurement::new(1.0, "cup");
        let g = convert_volume_to_weight(&milk, "leche").unwrap();
        assert_close(g.value, 236.588 * 1.03, 1e-9);
        assert_eq!(g.unit, "g");
    }

    #[test]
    fn test_unknown_substance_fails() {
        let m = Measurement::new(100.0, "g");
        assert!(convert_weight_to_volume(&m, "polvo misterioso").is_none());
    }

    #[test]
    fn test_wrong_category_fails() {
        // A count measurement cannot reach grams or milliliters.
        let eggs = Measurement::new(2.0, "unidad");
        assert!(convert_weight_to_volume(&eggs, "agua").is_none());
        assert!(convert_volume_to_weight(&eggs, "agua").is_none());
    }

    #[test]
    fn test_density_round_trip() {
        let flour = Measurement::new(250.0, "g");
        let ml = convert_weight_to_volume(&flour, "harina").unwrap();
        let back = convert_volume_to_weight(&ml, "harina").unwrap();
        assert_close(back.value, 250.0, 1e-6);
    }
}
