use crate::emissions::round2;
use crate::models::{
    Activity, Category, CategoryTotal, DailyPoint, DashboardResponse, SessionUser, WeeklySummary,
};
use chrono::{Datelike, Duration, Local, NaiveDate};
use std::collections::BTreeSet;

const WEEK_DAYS: i64 = 7;
const DASHBOARD_TOP: usize = 3;

pub fn local_date(activity: &Activity) -> NaiveDate {
    activity.recorded_at.with_timezone(&Local).date_naive()
}

pub fn activities_on(activities: &[Activity], date: NaiveDate) -> Vec<&Activity> {
    activities
        .iter()
        .filter(|activity| local_date(activity) == date)
        .collect()
}

pub fn aggregate_by_day(activities: &[Activity], date: NaiveDate) -> f64 {
    activities_on(activities, date)
        .iter()
        .map(|activity| activity.co2_kg)
        .sum()
}

/// Seven calendar days ending at `reference`. The average divides by the
/// number of days that had at least one activity, not by the window length.
pub fn aggregate_weekly(activities: &[Activity], reference: NaiveDate) -> WeeklySummary {
    let start = reference - Duration::days(WEEK_DAYS - 1);

    let mut days = Vec::with_capacity(WEEK_DAYS as usize);
    for offset in 0..WEEK_DAYS {
        let date = start + Duration::days(offset);
        let on_day = activities_on(activities, date);
        days.push(DailyPoint {
            date: date.to_string(),
            day: weekday_label(date),
            emissions_kg: round2(on_day.iter().map(|activity| activity.co2_kg).sum()),
            activity_count: on_day.len(),
        });
    }

    let in_window: Vec<&Activity> = activities
        .iter()
        .filter(|activity| {
            let date = local_date(activity);
            date >= start && date <= reference
        })
        .collect();

    let total: f64 = in_window.iter().map(|activity| activity.co2_kg).sum();
    let active_days = in_window
        .iter()
        .map(|activity| local_date(activity))
        .collect::<BTreeSet<_>>()
        .len();
    let average = if active_days == 0 {
        0.0
    } else {
        total / active_days as f64
    };

    WeeklySummary {
        start_date: start.to_string(),
        end_date: reference.to_string(),
        days,
        total_kg: round2(total),
        active_days,
        average_kg: round2(average),
    }
}

/// Per-category totals, largest first. Equal totals keep category order.
pub fn category_breakdown(activities: &[Activity]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Category::ALL
        .into_iter()
        .filter_map(|category| {
            let matching: Vec<f64> = activities
                .iter()
                .filter(|activity| activity.category() == category)
                .map(|activity| activity.co2_kg)
                .collect();
            if matching.is_empty() {
                None
            } else {
                Some(CategoryTotal {
                    category,
                    total_kg: round2(matching.iter().sum()),
                })
            }
        })
        .collect();

    totals.sort_by(|a, b| b.total_kg.total_cmp(&a.total_kg));
    totals
}

pub fn top_categories(activities: &[Activity], n: usize) -> Vec<Category> {
    category_breakdown(activities)
        .into_iter()
        .take(n)
        .map(|total| total.category)
        .collect()
}

pub fn build_dashboard(user: &SessionUser, activities: &[Activity]) -> DashboardResponse {
    build_dashboard_at(user, activities, Local::now().date_naive())
}

pub fn build_dashboard_at(
    user: &SessionUser,
    activities: &[Activity],
    today: NaiveDate,
) -> DashboardResponse {
    let breakdown = category_breakdown(activities);
    let top_categories = breakdown
        .iter()
        .take(DASHBOARD_TOP)
        .map(|total| total.category)
        .collect();

    DashboardResponse {
        name: user.name.clone(),
        today_kg: round2(aggregate_by_day(activities, today)),
        today_activity_count: activities_on(activities, today).len(),
        weekly: aggregate_weekly(activities, today),
        breakdown,
        top_categories,
    }
}

fn weekday_label(date: NaiveDate) -> String {
    date.weekday().to_string()
}
