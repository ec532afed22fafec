use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Transport,
    Household,
    Food,
    #[serde(rename = "Electricity Generation")]
    ElectricityGeneration,
    #[serde(rename = "Burning Plastic")]
    BurningPlastic,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Transport,
        Category::Household,
        Category::Food,
        Category::ElectricityGeneration,
        Category::BurningPlastic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Transport => "Transport",
            Category::Household => "Household",
            Category::Food => "Food",
            Category::ElectricityGeneration => "Electricity Generation",
            Category::BurningPlastic => "Burning Plastic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "km")]
    Km,
    #[serde(rename = "kWh")]
    Kwh,
    #[serde(rename = "kg")]
    Kg,
    #[serde(rename = "litre")]
    Litre,
    #[serde(rename = "tonne")]
    Tonne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightType {
    Domestic,
    ShortHaul,
    LongHaul,
}

/// Subcategory identity without its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subcategory {
    Car,
    Motorbike,
    Bus,
    Train,
    Airplane,
    Electricity,
    NaturalGas,
    Lpg,
    Beef,
    Lamb,
    Pork,
    Chicken,
    Fish,
    Cheese,
    Rice,
    Vegetables,
    CoalPower,
    GasPower,
    OilPower,
    SolarPower,
    WindPower,
    HydroPower,
    NuclearPower,
    PlasticWaste,
}

/// A recorded activity's type. Each variant carries exactly the modifiers
/// its emission factor depends on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subcategory", rename_all = "snake_case")]
pub enum ActivityKind {
    Car { fuel: FuelType },
    Motorbike,
    Bus,
    Train,
    Airplane { flight: FlightType },
    Electricity,
    NaturalGas,
    Lpg,
    Beef,
    Lamb,
    Pork,
    Chicken,
    Fish,
    Cheese,
    Rice,
    Vegetables,
    CoalPower,
    GasPower,
    OilPower,
    SolarPower,
    WindPower,
    HydroPower,
    NuclearPower,
    PlasticWaste { duration_hours: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub kind: ActivityKind,
    pub amount: f64,
    pub co2_kg: f64,
    pub recorded_at: DateTime<Utc>,
}

impl Activity {
    pub fn category(&self) -> Category {
        self.kind.subcategory().category()
    }

    pub fn unit(&self) -> Unit {
        self.kind.subcategory().unit()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// Snapshot of the logged-in user kept next to the user list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackerData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub current_user: Option<SessionUser>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityOrder {
    #[default]
    Oldest,
    Newest,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Modifiers {
    pub fuel_type: Option<String>,
    pub flight_type: Option<String>,
    pub duration_hours: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivityInput {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    /// Number inputs arrive as numbers or numeric strings; anything else is
    /// treated as missing.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Option<f64>,
    #[serde(flatten)]
    pub modifiers: Modifiers,
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Option::<RawAmount>::deserialize(deserializer)? {
        Some(RawAmount::Number(value)) => Some(value),
        Some(RawAmount::Text(text)) => text.trim().parse().ok(),
        Some(RawAmount::Other(_)) | None => None,
    })
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ActivityListQuery {
    #[serde(default)]
    pub order: ActivityOrder,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PasswordStrengthRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub activity_count: usize,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            activity_count: user.activities.len(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: Option<SessionUser>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityView {
    pub id: String,
    pub category: Category,
    pub subcategory: String,
    pub amount: f64,
    pub unit: Unit,
    pub co2_kg: f64,
    pub recorded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_type: Option<FlightType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
}

impl From<&Activity> for ActivityView {
    fn from(activity: &Activity) -> Self {
        let (fuel_type, flight_type, duration_hours) = match activity.kind {
            ActivityKind::Car { fuel } => (Some(fuel), None, None),
            ActivityKind::Airplane { flight } => (None, Some(flight), None),
            ActivityKind::PlasticWaste { duration_hours } => (None, None, Some(duration_hours)),
            _ => (None, None, None),
        };
        Self {
            id: activity.id.clone(),
            category: activity.category(),
            subcategory: activity.kind.subcategory().label().to_string(),
            amount: activity.amount,
            unit: activity.unit(),
            co2_kg: activity.co2_kg,
            recorded_at: activity.recorded_at,
            fuel_type,
            flight_type,
            duration_hours,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub activity_count: usize,
    pub total_co2_kg: f64,
    pub activities: Vec<ActivityView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub day: String,
    pub emissions_kg: f64,
    pub activity_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<DailyPoint>,
    pub total_kg: f64,
    pub active_days: usize,
    pub average_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total_kg: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub name: String,
    pub today_kg: f64,
    pub today_activity_count: usize,
    pub weekly: WeeklySummary,
    pub breakdown: Vec<CategoryTotal>,
    pub top_categories: Vec<Category>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipCategory {
    Transport,
    Energy,
    Food,
    Waste,
    Water,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tip {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub monthly_impact_kg: f64,
    pub category: TipCategory,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TipsResponse {
    pub focus: Vec<Category>,
    pub total_potential_kg: f64,
    pub tips: Vec<Tip>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    Weak,
    Medium,
    Good,
    Strong,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PasswordStrengthResponse {
    pub level: Option<StrengthLevel>,
    pub missing: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FactorOption {
    pub key: String,
    pub factor: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubcategoryEntry {
    pub key: Subcategory,
    pub label: String,
    pub unit: Unit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fuel_types: Vec<FactorOption>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub flight_types: Vec<FactorOption>,
    pub per_hour: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub category: Category,
    pub subcategories: Vec<SubcategoryEntry>,
}
