use crate::models::{Category, Tip, TipCategory};

const TIPS: [(u32, &str, &str, f64, TipCategory); 6] = [
    (
        1,
        "Use Public Transport",
        "Switch from personal vehicles to buses, trains, or metro to significantly reduce your carbon footprint.",
        45.5,
        TipCategory::Transport,
    ),
    (
        2,
        "Switch to LED Bulbs",
        "LED bulbs use 75% less energy and last 25 times longer than traditional incandescent bulbs.",
        12.3,
        TipCategory::Energy,
    ),
    (
        3,
        "Reduce Meat Consumption",
        "Eating more plant-based meals reduces emissions from livestock farming and land use.",
        28.7,
        TipCategory::Food,
    ),
    (
        4,
        "Unplug Electronics",
        "Devices consume energy even when turned off. Unplug chargers and appliances when not in use.",
        8.9,
        TipCategory::Energy,
    ),
    (
        5,
        "Use Reusable Bags",
        "Plastic bags take hundreds of years to decompose. Carry reusable bags for shopping.",
        5.2,
        TipCategory::Waste,
    ),
    (
        6,
        "Save Water",
        "Fix leaks, take shorter showers, and use water-efficient fixtures to conserve water and energy.",
        7.4,
        TipCategory::Water,
    ),
];

pub fn all_tips() -> Vec<Tip> {
    TIPS.iter()
        .map(|(id, title, description, impact, category)| Tip {
            id: *id,
            title: title.to_string(),
            description: description.to_string(),
            monthly_impact_kg: *impact,
            category: *category,
        })
        .collect()
}

/// Monthly CO₂ saved by following every tip.
pub fn total_potential_impact() -> f64 {
    TIPS.iter().map(|(_, _, _, impact, _)| impact).sum()
}

pub fn tip_category_for(category: Category) -> TipCategory {
    match category {
        Category::Transport => TipCategory::Transport,
        Category::Household | Category::ElectricityGeneration => TipCategory::Energy,
        Category::Food => TipCategory::Food,
        Category::BurningPlastic => TipCategory::Waste,
    }
}

/// Every tip, with those matching `focus` (in focus order) moved to the front.
pub fn personalized_tips(focus: &[Category]) -> Vec<Tip> {
    let mut remaining = all_tips();
    let mut ordered = Vec::with_capacity(remaining.len());

    for category in focus {
        let wanted = tip_category_for(*category);
        let (matching, rest): (Vec<Tip>, Vec<Tip>) =
            remaining.into_iter().partition(|tip| tip.category == wanted);
        ordered.extend(matching);
        remaining = rest;
    }

    ordered.extend(remaining);
    ordered
}
