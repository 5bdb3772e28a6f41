//! # Unit Conversion
//!
//! Canonical unit categories, the direct conversion table, and the
//! resolution algorithm that makes heterogeneous measurements comparable.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    convert(m, to_unit)                              │
//! │                                                                     │
//! │  1. Identity          m.unit == to_unit        → unchanged          │
//! │  2. Direct entry      (from, to) in table      → multiply           │
//! │  3. Reverse entry     (to, from) in table      → divide             │
//! │  4. Same category     from → base → to         → two single hops    │
//! │  5. Otherwise         incompatible             → None               │
//! │                                                                     │
//! │  The table is NOT fully connected (tsp→ml exists, tsp→l does not),  │
//! │  so step 4 routes through the category base unit. Each hop is one   │
//! │  direct/reverse lookup — never a deeper search.                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers must treat `None` as "cannot convert" and fall back to the
//! original value; conversion never panics and never returns an error.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::types::Measurement;

// =============================================================================
// Unit Categories
// =============================================================================

/// The closed set of measurement categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCategory {
    /// kg, g, lb, oz — base unit g.
    Weight,
    /// l, ml, cup, tbsp, tsp — base unit ml.
    Volume,
    /// unidad, docena, paquete, sobre — base unit unidad.
    Count,
}

impl UnitCategory {
    /// The canonical unit of this category, used as the transitive hop for
    /// otherwise-unconnected conversions.
    #[inline]
    pub const fn base_unit(&self) -> &'static str {
        match self {
            UnitCategory::Weight => "g",
            UnitCategory::Volume => "ml",
            UnitCategory::Count => "unidad",
        }
    }

    /// All units registered in this category.
    pub const fn units(&self) -> &'static [&'static str] {
        match self {
            UnitCategory::Weight => &["kg", "g", "lb", "oz"],
            UnitCategory::Volume => &["l", "ml", "cup", "tbsp", "tsp"],
            UnitCategory::Count => &["unidad", "docena", "paquete", "sobre"],
        }
    }
}

/// Looks up the category a unit belongs to. `None` for unregistered units
/// (package units like "botella" are not general-conversion units).
pub fn category_of(unit: &str) -> Option<UnitCategory> {
    let categories = [
        UnitCategory::Weight,
        UnitCategory::Volume,
        UnitCategory::Count,
    ];
    categories
        .into_iter()
        .find(|c| c.units().contains(&unit))
}

// =============================================================================
// Conversion Table
// =============================================================================

/// Direct conversion factors: value in `from` × factor = value in `to`.
///
/// Loaded once at first use; process-wide immutable data, never exposed
/// for runtime mutation.
static CONVERSION_TABLE: LazyLock<HashMap<(&'static str, &'static str), f64>> =
    LazyLock::new(|| {
        let mut t = HashMap::new();

        // Weight
        t.insert(("kg", "g"), 1000.0);
        t.insert(("g", "kg"), 0.001);
        t.insert(("kg", "lb"), 2.20462);
        t.insert(("lb", "kg"), 0.453592);
        t.insert(("g", "oz"), 0.035274);
        t.insert(("oz", "g"), 28.3495);

        // Volume
        t.insert(("l", "ml"), 1000.0);
        t.insert(("ml", "l"), 0.001);
        t.insert(("l", "cup"), 4.22675);
        t.insert(("cup", "ml"), 236.588);
        t.insert(("tbsp", "ml"), 14.7868);
        t.insert(("tsp", "ml"), 4.92892);

        // Count & packaged goods
        t.insert(("docena", "unidad"), 12.0);
        t.insert(("unidad", "docena"), 1.0 / 12.0);
        t.insert(("paquete", "g"), 250.0);
        t.insert(("sobre", "g"), 11.0);

        t
    });

/// One table hop: identity, direct entry (multiply) or reverse entry (divide).
fn table_hop(value: f64, from: &str, to: &str) -> Option<f64> {
    if from == to {
        return Some(value);
    }
    if let Some(factor) = CONVERSION_TABLE.get(&(from, to)) {
        return Some(value * factor);
    }
    if let Some(factor) = CONVERSION_TABLE.get(&(to, from)) {
        return Some(value / factor);
    }
    None
}

// =============================================================================
// Conversion
// =============================================================================

/// Converts a measurement to `to_unit`.
///
/// Returns `None` when the units are incompatible — this is not an error;
/// callers fall back to the original value/unit.
///
/// ## Example
/// ```rust
/// use obrador_core::types::Measurement;
/// use obrador_core::units::convert;
///
/// let cup = Measurement::new(2.0, "cup");
/// let ml = convert(&cup, "ml").unwrap();
/// assert!((ml.value - 473.176).abs() < 1e-6);
///
/// // tsp→l has no table entry in either direction: routed via ml
/// let tsp = Measurement::new(1.0, "tsp");
/// let l = convert(&tsp, "l").unwrap();
/// assert!((l.value - 0.00492892).abs() < 1e-9);
///
/// // cross-category without a density: incompatible
/// assert!(convert(&Measurement::new(1.0, "kg"), "ml").is_none());
/// ```
pub fn convert(measurement: &Measurement, to_unit: &str) -> Option<Measurement> {
    let to_unit = to_unit.to_lowercase();

    // 1. Identity
    if measurement.unit == to_unit {
        return Some(measurement.clone());
    }

    // 2./3. Direct or reverse table entry
    if let Some(value) = table_hop(measurement.value, &measurement.unit, &to_unit) {
        return Some(Measurement::new(value, to_unit));
    }

    // 4. Same category: two hops via the base unit
    let from_category = category_of(&measurement.unit)?;
    let to_category = category_of(&to_unit)?;
    if from_category != to_category {
        return None;
    }
    let base = from_category.base_unit();
    let in_base = table_hop(measurement.value, &measurement.unit, base)?;
    let value = table_hop(in_base, base, &to_unit)?;
    Some(Measurement::new(value, to_unit))
}

// =============================================================================
// Measurement Parsing
// =============================================================================

/// Parses `"1.5 kg"` / `"500g"` style strings. `None` on anything
/// unparsable; never panics.
pub fn parse_measurement(input: &str) -> Option<Measurement> {
    let input = input.trim();
    let unit_start = input.find(|c: char| c.is_alphabetic())?;
    let (number, unit) = input.split_at(unit_start);
    let value: f64 = number.trim().parse().ok()?;
    let unit = unit.trim();
    if unit.is_empty() {
        return None;
    }
    Some(Measurement::new(value, unit))
}

// =============================================================================
// Standard-Unit Normalization (costing only)
// =============================================================================

/// Fixed package defaults: one `unit` holds `factor` of `standard unit`.
static PACKAGE_DEFAULTS: LazyLock<HashMap<&'static str, (f64, &'static str)>> =
    LazyLock::new(|| {
        let mut t = HashMap::new();
        t.insert("docena", (12.0, "unidad"));
        t.insert("paquete", (250.0, "g"));
        t.insert("sobre", (11.0, "g"));
        t.insert("botella", (1000.0, "ml"));
        t.insert("bolsa", (1000.0, "g"));
        t.insert("caja", (1000.0, "g"));
        t.insert("latas", (1.0, "unidad"));
        t
    });

/// Normalizes a quantity to its standard unit for costing.
///
/// ## Package Semantics
/// For package units (botella, bolsa, docena, paquete, sobre, caja, latas)
/// with an explicit `contains_amount`/`contains_unit` pair, the contained
/// quantity is itself resolved to standard terms and multiplied out.
/// Without the pair, the fixed defaults above apply.
///
/// Units outside the package set pass through unchanged — deliberately.
/// A kg-priced ingredient is costed against its stated amount/unit, not
/// forced into grams.
///
/// ## Example
/// ```rust
/// use obrador_core::units::convert_to_standard_unit;
///
/// let std = convert_to_standard_unit(1.0, "docena", None, None);
/// assert_eq!((std.value, std.unit.as_str()), (12.0, "unidad"));
///
/// let std = convert_to_standard_unit(2.0, "paquete", None, None);
/// assert_eq!((std.value, std.unit.as_str()), (500.0, "g"));
/// ```
pub fn convert_to_standard_unit(
    amount: f64,
    unit: &str,
    contains_amount: Option<f64>,
    contains_unit: Option<&str>,
) -> Measurement {
    let unit = unit.to_lowercase();

    if PACKAGE_DEFAULTS.contains_key(unit.as_str()) {
        // Explicit package contents win over the defaults.
        if let (Some(inner_amount), Some(inner_unit)) = (contains_amount, contains_unit) {
            let inner = convert_to_standard_unit(inner_amount, inner_unit, None, None);
            return Measurement::new(amount * inner.value, inner.unit);
        }
        if let Some((factor, standard_unit)) = PACKAGE_DEFAULTS.get(unit.as_str()) {
            return Measurement::new(amount * factor, *standard_unit);
        }
    }

    Measurement::new(amount, unit)
}

// =============================================================================
// Unit Tests
// =============================================================================
