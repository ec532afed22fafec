//! Emission factors and the CO₂ calculation for recorded activities.
//!
//! Factors are kilograms of CO₂-equivalent per unit of the subcategory's
//! unit. Car and airplane factors depend on the fuel or flight type, and
//! plastic burning scales with duration in hours.

use crate::errors::TrackerError;
use crate::models::{
    ActivityKind, Category, CategoryEntry, FactorOption, FlightType, FuelType, Modifiers,
    Subcategory, SubcategoryEntry, Unit,
};

const FUEL_FACTORS: [(FuelType, f64); 4] = [
    (FuelType::Petrol, 0.192),
    (FuelType::Diesel, 0.171),
    (FuelType::Electric, 0.053),
    (FuelType::Hybrid, 0.109),
];

const FLIGHT_FACTORS: [(FlightType, f64); 3] = [
    (FlightType::Domestic, 0.255),
    (FlightType::ShortHaul, 0.156),
    (FlightType::LongHaul, 0.150),
];

const PLASTIC_WASTE_PER_HOUR: f64 = 6000.0;

impl Subcategory {
    pub const ALL: [Subcategory; 24] = [
        Subcategory::Car,
        Subcategory::Motorbike,
        Subcategory::Bus,
        Subcategory::Train,
        Subcategory::Airplane,
        Subcategory::Electricity,
        Subcategory::NaturalGas,
        Subcategory::Lpg,
        Subcategory::Beef,
        Subcategory::Lamb,
        Subcategory::Pork,
        Subcategory::Chicken,
        Subcategory::Fish,
        Subcategory::Cheese,
        Subcategory::Rice,
        Subcategory::Vegetables,
        Subcategory::CoalPower,
        Subcategory::GasPower,
        Subcategory::OilPower,
        Subcategory::SolarPower,
        Subcategory::WindPower,
        Subcategory::HydroPower,
        Subcategory::NuclearPower,
        Subcategory::PlasticWaste,
    ];

    pub fn category(self) -> Category {
        use Subcategory::*;
        match self {
            Car | Motorbike | Bus | Train | Airplane => Category::Transport,
            Electricity | NaturalGas | Lpg => Category::Household,
            Beef | Lamb | Pork | Chicken | Fish | Cheese | Rice | Vegetables => Category::Food,
            CoalPower | GasPower | OilPower | SolarPower | WindPower | HydroPower
            | NuclearPower => Category::ElectricityGeneration,
            PlasticWaste => Category::BurningPlastic,
        }
    }

    /// Label as shown in forms. Generation sources share names with
    /// household fuels, so the category disambiguates them.
    pub fn label(self) -> &'static str {
        use Subcategory::*;
        match self {
            Car => "Car",
            Motorbike => "Motorbike",
            Bus => "Bus",
            Train => "Train",
            Airplane => "Airplane",
            Electricity => "Electricity",
            NaturalGas | GasPower => "Natural Gas",
            Lpg => "LPG",
            Beef => "Beef",
            Lamb => "Lamb",
            Pork => "Pork",
            Chicken => "Chicken",
            Fish => "Fish",
            Cheese => "Cheese",
            Rice => "Rice",
            Vegetables => "Vegetables",
            CoalPower => "Coal",
            OilPower => "Oil",
            SolarPower => "Solar",
            WindPower => "Wind",
            HydroPower => "Hydro",
            NuclearPower => "Nuclear",
            PlasticWaste => "Plastic Waste",
        }
    }

    pub fn unit(self) -> Unit {
        use Subcategory::*;
        match self {
            Car | Motorbike | Bus | Train | Airplane => Unit::Km,
            Electricity | NaturalGas => Unit::Kwh,
            Lpg => Unit::Litre,
            Beef | Lamb | Pork | Chicken | Fish | Cheese | Rice | Vegetables => Unit::Kg,
            CoalPower | GasPower | OilPower | SolarPower | WindPower | HydroPower
            | NuclearPower => Unit::Kwh,
            PlasticWaste => Unit::Tonne,
        }
    }

    /// Flat per-unit factor. `None` for subcategories whose factor comes from
    /// a modifier sub-table.
    pub fn base_factor(self) -> Option<f64> {
        use Subcategory::*;
        let factor = match self {
            Car | Airplane => return None,
            Motorbike => 0.103,
            Bus => 0.105,
            Train => 0.041,
            Electricity => 0.82,
            NaturalGas => 0.183,
            Lpg => 1.51,
            Beef => 27.0,
            Lamb => 39.2,
            Pork => 12.1,
            Chicken => 6.9,
            Fish => 6.1,
            Cheese => 13.5,
            Rice => 2.7,
            Vegetables => 2.0,
            CoalPower => 0.91,
            GasPower => 0.49,
            OilPower => 0.65,
            SolarPower => 0.048,
            WindPower => 0.011,
            HydroPower => 0.024,
            NuclearPower => 0.012,
            PlasticWaste => PLASTIC_WASTE_PER_HOUR,
        };
        Some(factor)
    }

    fn find(category: Category, label: &str) -> Option<Subcategory> {
        let wanted = normalize(label);
        Subcategory::ALL
            .into_iter()
            .filter(|sub| sub.category() == category)
            .find(|sub| normalize(sub.label()) == wanted)
    }
}

impl FuelType {
    pub fn factor(self) -> f64 {
        lookup(&FUEL_FACTORS, self)
    }

    fn key(self) -> &'static str {
        match self {
            FuelType::Petrol => "petrol",
            FuelType::Diesel => "diesel",
            FuelType::Electric => "electric",
            FuelType::Hybrid => "hybrid",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        let wanted = normalize(value);
        FUEL_FACTORS
            .iter()
            .map(|(fuel, _)| *fuel)
            .find(|fuel| normalize(fuel.key()) == wanted)
    }
}

impl FlightType {
    pub fn factor(self) -> f64 {
        lookup(&FLIGHT_FACTORS, self)
    }

    fn key(self) -> &'static str {
        match self {
            FlightType::Domestic => "domestic",
            FlightType::ShortHaul => "short_haul",
            FlightType::LongHaul => "long_haul",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        let wanted = normalize(value);
        FLIGHT_FACTORS
            .iter()
            .map(|(flight, _)| *flight)
            .find(|flight| normalize(flight.key()) == wanted)
    }
}

impl ActivityKind {
    /// Builds the typed activity kind from loose form input.
    pub fn parse(
        category: &str,
        subcategory: &str,
        modifiers: &Modifiers,
    ) -> Result<Self, TrackerError> {
        let unknown = || TrackerError::unknown_activity(format!("{category}/{subcategory}"));

        let category = parse_category(category).ok_or_else(unknown)?;
        let sub = Subcategory::find(category, subcategory).ok_or_else(unknown)?;

        match sub {
            Subcategory::Car => {
                let raw = required(modifiers.fuel_type.as_deref(), "Fuel type is required for Car")?;
                let fuel = FuelType::parse(raw)
                    .ok_or_else(|| TrackerError::unknown_activity(format!("Car/{raw}")))?;
                Ok(ActivityKind::Car { fuel })
            }
            Subcategory::Airplane => {
                let raw = required(
                    modifiers.flight_type.as_deref(),
                    "Flight type is required for Airplane",
                )?;
                let flight = FlightType::parse(raw)
                    .ok_or_else(|| TrackerError::unknown_activity(format!("Airplane/{raw}")))?;
                Ok(ActivityKind::Airplane { flight })
            }
            Subcategory::PlasticWaste => match modifiers.duration_hours {
                Some(hours) if hours.is_finite() && hours > 0.0 => {
                    Ok(ActivityKind::PlasticWaste { duration_hours: hours })
                }
                _ => Err(TrackerError::validation(
                    "Duration in hours must be greater than zero",
                )),
            },
            other => ActivityKind::plain(other).ok_or_else(unknown),
        }
    }

    /// Kind for a subcategory that takes no modifiers.
    pub fn plain(sub: Subcategory) -> Option<Self> {
        use Subcategory as S;
        let kind = match sub {
            S::Car | S::Airplane | S::PlasticWaste => return None,
            S::Motorbike => ActivityKind::Motorbike,
            S::Bus => ActivityKind::Bus,
            S::Train => ActivityKind::Train,
            S::Electricity => ActivityKind::Electricity,
            S::NaturalGas => ActivityKind::NaturalGas,
            S::Lpg => ActivityKind::Lpg,
            S::Beef => ActivityKind::Beef,
            S::Lamb => ActivityKind::Lamb,
            S::Pork => ActivityKind::Pork,
            S::Chicken => ActivityKind::Chicken,
            S::Fish => ActivityKind::Fish,
            S::Cheese => ActivityKind::Cheese,
            S::Rice => ActivityKind::Rice,
            S::Vegetables => ActivityKind::Vegetables,
            S::CoalPower => ActivityKind::CoalPower,
            S::GasPower => ActivityKind::GasPower,
            S::OilPower => ActivityKind::OilPower,
            S::SolarPower => ActivityKind::SolarPower,
            S::WindPower => ActivityKind::WindPower,
            S::HydroPower => ActivityKind::HydroPower,
            S::NuclearPower => ActivityKind::NuclearPower,
        };
        Some(kind)
    }

    pub fn subcategory(&self) -> Subcategory {
        use Subcategory as S;
        match self {
            ActivityKind::Car { .. } => S::Car,
            ActivityKind::Motorbike => S::Motorbike,
            ActivityKind::Bus => S::Bus,
            ActivityKind::Train => S::Train,
            ActivityKind::Airplane { .. } => S::Airplane,
            ActivityKind::Electricity => S::Electricity,
            ActivityKind::NaturalGas => S::NaturalGas,
            ActivityKind::Lpg => S::Lpg,
            ActivityKind::Beef => S::Beef,
            ActivityKind::Lamb => S::Lamb,
            ActivityKind::Pork => S::Pork,
            ActivityKind::Chicken => S::Chicken,
            ActivityKind::Fish => S::Fish,
            ActivityKind::Cheese => S::Cheese,
            ActivityKind::Rice => S::Rice,
            ActivityKind::Vegetables => S::Vegetables,
            ActivityKind::CoalPower => S::CoalPower,
            ActivityKind::GasPower => S::GasPower,
            ActivityKind::OilPower => S::OilPower,
            ActivityKind::SolarPower => S::SolarPower,
            ActivityKind::WindPower => S::WindPower,
            ActivityKind::HydroPower => S::HydroPower,
            ActivityKind::NuclearPower => S::NuclearPower,
            ActivityKind::PlasticWaste { .. } => S::PlasticWaste,
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            ActivityKind::Car { fuel } => fuel.factor(),
            ActivityKind::Airplane { flight } => flight.factor(),
            ActivityKind::PlasticWaste { .. } => PLASTIC_WASTE_PER_HOUR,
            other => other.subcategory().base_factor().unwrap_or_default(),
        }
    }
}

/// CO₂ in kilograms for `amount` units of `kind`, rounded to two decimals.
pub fn compute_co2(kind: &ActivityKind, amount: f64) -> Result<f64, TrackerError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(TrackerError::validation("Please enter a valid amount"));
    }

    let raw = match kind {
        ActivityKind::PlasticWaste { duration_hours } => amount * kind.factor() * duration_hours,
        _ => amount * kind.factor(),
    };
    let co2 = round2(raw);
    if !co2.is_finite() {
        return Err(TrackerError::validation("Amount is too large"));
    }
    Ok(co2)
}

/// `compute_co2` over loose form input.
pub fn compute_co2_for(
    category: &str,
    subcategory: &str,
    amount: f64,
    modifiers: &Modifiers,
) -> Result<f64, TrackerError> {
    let kind = ActivityKind::parse(category, subcategory, modifiers)?;
    compute_co2(&kind, amount)
}

/// The full factor table, grouped by category.
pub fn catalog() -> Vec<CategoryEntry> {
    Category::ALL
        .into_iter()
        .map(|category| CategoryEntry {
            category,
            subcategories: Subcategory::ALL
                .into_iter()
                .filter(|sub| sub.category() == category)
                .map(catalog_entry)
                .collect(),
        })
        .collect()
}

fn catalog_entry(sub: Subcategory) -> SubcategoryEntry {
    let fuel_types = match sub {
        Subcategory::Car => FUEL_FACTORS
            .iter()
            .map(|(fuel, factor)| FactorOption {
                key: fuel.key().to_string(),
                factor: *factor,
            })
            .collect(),
        _ => Vec::new(),
    };
    let flight_types = match sub {
        Subcategory::Airplane => FLIGHT_FACTORS
            .iter()
            .map(|(flight, factor)| FactorOption {
                key: flight.key().to_string(),
                factor: *factor,
            })
            .collect(),
        _ => Vec::new(),
    };

    SubcategoryEntry {
        key: sub,
        label: sub.label().to_string(),
        unit: sub.unit(),
        factor: sub.base_factor(),
        fuel_types,
        flight_types,
        per_hour: sub == Subcategory::PlasticWaste,
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn parse_category(value: &str) -> Option<Category> {
    let wanted = normalize(value);
    Category::ALL
        .into_iter()
        .find(|category| normalize(category.label()) == wanted)
}

fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, TrackerError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(TrackerError::validation(message)),
    }
}

fn lookup<K: PartialEq + Copy>(table: &[(K, f64)], key: K) -> f64 {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, factor)| *factor)
        .unwrap_or_default()
}

fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fuel(value: &str) -> Modifiers {
        Modifiers {
            fuel_type: Some(value.to_string()),
            ..Modifiers::default()
        }
    }

    #[test]
    fn car_on_petrol_uses_fuel_factor() {
        let co2 = compute_co2_for("Transport", "Car", 100.0, &fuel("petrol")).unwrap();
        assert_eq!(co2, 19.20);
    }

    #[test]
    fn plastic_waste_scales_with_duration() {
        let modifiers = Modifiers {
            duration_hours: Some(3.0),
            ..Modifiers::default()
        };
        let co2 = compute_co2_for("Burning Plastic", "Plastic Waste", 2.0, &modifiers).unwrap();
        assert_eq!(co2, 36000.00);
    }

    #[test]
    fn household_electricity_matches_flat_factor() {
        let co2 = compute_co2_for("Household", "Electricity", 10.0, &Modifiers::default()).unwrap();
        assert_eq!(co2, 8.2);
    }

    #[test]
    fn flight_type_selects_sub_table() {
        let modifiers = Modifiers {
            flight_type: Some("long-haul".to_string()),
            ..Modifiers::default()
        };
        let co2 = compute_co2_for("transport", "airplane", 1000.0, &modifiers).unwrap();
        assert_eq!(co2, 150.0);
    }

    #[test]
    fn result_is_rounded_to_two_decimals() {
        let co2 = compute_co2_for("Transport", "Train", 3.333, &Modifiers::default()).unwrap();
        assert_eq!(co2, 0.14);
    }

    #[test]
    fn labels_are_matched_loosely() {
        let kind =
            ActivityKind::parse("electricity_generation", "natural-gas", &Modifiers::default())
                .unwrap();
        assert_eq!(kind, ActivityKind::GasPower);

        let kind = ActivityKind::parse("Household", "Natural Gas", &Modifiers::default()).unwrap();
        assert_eq!(kind, ActivityKind::NaturalGas);
    }

    #[test]
    fn unknown_pairs_are_rejected() {
        let err = ActivityKind::parse("Transport", "Beef", &Modifiers::default()).unwrap_err();
        assert!(matches!(err, TrackerError::UnknownActivityType(_)));

        let err = ActivityKind::parse("Space", "Rocket", &Modifiers::default()).unwrap_err();
        assert!(matches!(err, TrackerError::UnknownActivityType(_)));

        let err = ActivityKind::parse("Transport", "Car", &fuel("kerosene")).unwrap_err();
        assert!(matches!(err, TrackerError::UnknownActivityType(_)));
    }

    #[test]
    fn missing_modifiers_are_validation_errors() {
        let err = ActivityKind::parse("Transport", "Car", &Modifiers::default()).unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));

        let err =
            ActivityKind::parse("Transport", "Airplane", &Modifiers::default()).unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));

        let modifiers = Modifiers {
            duration_hours: Some(0.0),
            ..Modifiers::default()
        };
        let err =
            ActivityKind::parse("Burning Plastic", "Plastic Waste", &modifiers).unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = compute_co2(&ActivityKind::Bus, amount).unwrap_err();
            assert_eq!(err, TrackerError::validation("Please enter a valid amount"));
        }
    }

    #[test]
    fn overflowing_amount_is_rejected() {
        let err = compute_co2(&ActivityKind::Beef, 1e307).unwrap_err();
        assert_eq!(err, TrackerError::validation("Amount is too large"));
    }

    #[test]
    fn overflowing_duration_is_rejected() {
        let kind = ActivityKind::PlasticWaste {
            duration_hours: 1e300,
        };
        let err = compute_co2(&kind, 1e10).unwrap_err();
        assert_eq!(err, TrackerError::validation("Amount is too large"));
    }

    #[test]
    fn every_subcategory_is_deterministic_and_non_negative() {
        for sub in Subcategory::ALL {
            let kind = match sub {
                Subcategory::Car => ActivityKind::Car { fuel: FuelType::Diesel },
                Subcategory::Airplane => ActivityKind::Airplane {
                    flight: FlightType::Domestic,
                },
                Subcategory::PlasticWaste => ActivityKind::PlasticWaste { duration_hours: 0.5 },
                other => ActivityKind::plain(other).unwrap(),
            };
            assert_eq!(kind.subcategory(), sub);

            let first = compute_co2(&kind, 12.5).unwrap();
            let second = compute_co2(&kind, 12.5).unwrap();
            assert_eq!(first, second);
            assert!(first >= 0.0);
        }
    }

    #[test]
    fn catalog_lists_every_subcategory_once() {
        let entries = catalog();
        assert_eq!(entries.len(), Category::ALL.len());
        let total: usize = entries.iter().map(|entry| entry.subcategories.len()).sum();
        assert_eq!(total, Subcategory::ALL.len());

        let car = entries[0]
            .subcategories
            .iter()
            .find(|entry| entry.key == Subcategory::Car)
            .unwrap();
        assert_eq!(car.factor, None);
        assert_eq!(car.fuel_types.len(), 4);
        assert_eq!(car.fuel_types[0].factor, 0.192);
    }
}
