//! Users, their activities, and the current session subject.

use crate::emissions::compute_co2;
use crate::errors::TrackerError;
use crate::models::{
    Activity, ActivityInput, ActivityKind, ActivityOrder, SessionUser, TrackerData, User,
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct Tracker {
    data: TrackerData,
}

impl Tracker {
    pub fn new(data: TrackerData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &TrackerData {
        &self.data
    }

    pub fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<&User, TrackerError> {
        let email = email.trim();
        if self.find_by_email(email).is_some() {
            warn!(email, "signup rejected: email already registered");
            return Err(TrackerError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: email.to_string(),
            password: password.to_string(),
            created_at: now,
            activities: Vec::new(),
        };
        info!(user_id = %user.id, "user signed up");
        self.data.users.push(user);

        let index = self.data.users.len() - 1;
        Ok(&self.data.users[index])
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<SessionUser, TrackerError> {
        let email = email.trim();
        let Some(user) = self.find_by_email(email) else {
            warn!(email, "login rejected: unknown email");
            return Err(TrackerError::UserNotFound);
        };
        if user.password != password {
            warn!(user_id = %user.id, "login rejected: wrong password");
            return Err(TrackerError::InvalidCredentials);
        }

        let session = SessionUser::from(user);
        info!(user_id = %session.id, "user logged in");
        self.data.current_user = Some(session.clone());
        Ok(session)
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.data.current_user.take() {
            info!(user_id = %session.id, "user logged out");
        }
    }

    /// The session subject, if it still resolves to a stored user.
    pub fn current_user(&self) -> Option<&User> {
        let session = self.data.current_user.as_ref()?;
        self.data.users.iter().find(|user| user.id == session.id)
    }

    pub fn session(&self) -> Option<SessionUser> {
        self.current_user().map(SessionUser::from)
    }

    pub fn add_activity(
        &mut self,
        input: &ActivityInput,
        now: DateTime<Utc>,
    ) -> Result<Activity, TrackerError> {
        let session_id = self
            .current_user()
            .map(|user| user.id.clone())
            .ok_or(TrackerError::NotLoggedIn)?;

        let amount = input
            .amount
            .ok_or_else(|| TrackerError::validation("Please enter a valid amount"))?;
        let kind = ActivityKind::parse(&input.category, &input.subcategory, &input.modifiers)?;
        let co2_kg = compute_co2(&kind, amount)?;
        let activity = Activity {
            id: Uuid::new_v4().to_string(),
            kind,
            amount,
            co2_kg,
            recorded_at: now,
        };

        let user = self
            .data
            .users
            .iter_mut()
            .find(|user| user.id == session_id)
            .ok_or(TrackerError::NotLoggedIn)?;
        user.activities.push(activity.clone());

        info!(
            user_id = %session_id,
            activity_id = %activity.id,
            co2_kg = activity.co2_kg,
            "activity recorded"
        );
        Ok(activity)
    }

    pub fn list_activities(&self, order: ActivityOrder) -> Result<Vec<&Activity>, TrackerError> {
        let user = self.current_user().ok_or(TrackerError::NotLoggedIn)?;
        let mut activities: Vec<&Activity> = user.activities.iter().collect();
        if order == ActivityOrder::Newest {
            activities.reverse();
        }
        Ok(activities)
    }

    fn find_by_email(&self, email: &str) -> Option<&User> {
        self.data.users.iter().find(|user| user.email == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Modifiers;

    fn tracker_with_ada() -> Tracker {
        let mut tracker = Tracker::default();
        tracker
            .signup("Ada", "ada@gmail.com", "abc12!", Utc::now())
            .unwrap();
        tracker
    }

    fn bus(amount: f64) -> ActivityInput {
        ActivityInput {
            category: "Transport".to_string(),
            subcategory: "Bus".to_string(),
            amount: Some(amount),
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn signup_creates_user_with_no_activities() {
        let mut tracker = Tracker::default();
        let user = tracker
            .signup(" Ada ", " ada@gmail.com ", "abc12!", Utc::now())
            .unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@gmail.com");
        assert!(user.activities.is_empty());
        assert!(tracker.current_user().is_none());
    }

    #[test]
    fn duplicate_email_fails_regardless_of_password() {
        let mut tracker = tracker_with_ada();
        for password in ["abc12!", "different9?"] {
            let err = tracker
                .signup("Other", "ada@gmail.com", password, Utc::now())
                .unwrap_err();
            assert_eq!(err, TrackerError::DuplicateEmail);
        }
        assert_eq!(tracker.data().users.len(), 1);
    }

    #[test]
    fn unknown_email_is_reported_before_password() {
        let mut tracker = tracker_with_ada();
        assert_eq!(
            tracker.login("nobody@gmail.com", "abc12!"),
            Err(TrackerError::UserNotFound)
        );
        assert_eq!(
            tracker.login("ada@gmail.com", "wrong"),
            Err(TrackerError::InvalidCredentials)
        );
        assert!(tracker.session().is_none());
    }

    #[test]
    fn login_and_logout_manage_session() {
        let mut tracker = tracker_with_ada();
        let session = tracker.login("ada@gmail.com", "abc12!").unwrap();
        assert_eq!(tracker.session(), Some(session));

        tracker.logout();
        assert!(tracker.session().is_none());
        tracker.logout();
        assert!(tracker.data().current_user.is_none());
    }

    #[test]
    fn add_activity_requires_session() {
        let mut tracker = tracker_with_ada();
        assert_eq!(
            tracker.add_activity(&bus(10.0), Utc::now()).unwrap_err(),
            TrackerError::NotLoggedIn
        );
        assert_eq!(
            tracker.list_activities(ActivityOrder::Oldest).unwrap_err(),
            TrackerError::NotLoggedIn
        );
    }

    #[test]
    fn add_activity_computes_and_appends() {
        let mut tracker = tracker_with_ada();
        tracker.login("ada@gmail.com", "abc12!").unwrap();

        let first = tracker.add_activity(&bus(10.0), Utc::now()).unwrap();
        assert_eq!(first.co2_kg, 1.05);
        let second = tracker.add_activity(&bus(20.0), Utc::now()).unwrap();

        let oldest = tracker.list_activities(ActivityOrder::Oldest).unwrap();
        assert_eq!(oldest[0].id, first.id);
        assert_eq!(oldest[1].id, second.id);

        let newest = tracker.list_activities(ActivityOrder::Newest).unwrap();
        assert_eq!(newest[0].id, second.id);
        assert_eq!(tracker.current_user().unwrap().activities.len(), 2);
    }

    #[test]
    fn rejected_activity_is_not_stored() {
        let mut tracker = tracker_with_ada();
        tracker.login("ada@gmail.com", "abc12!").unwrap();

        assert!(tracker.add_activity(&bus(0.0), Utc::now()).is_err());
        let mut unknown = bus(1.0);
        unknown.subcategory = "Rocket".to_string();
        assert!(matches!(
            tracker.add_activity(&unknown, Utc::now()),
            Err(TrackerError::UnknownActivityType(_))
        ));
        assert!(tracker.list_activities(ActivityOrder::Oldest).unwrap().is_empty());
    }

    #[test]
    fn missing_amount_is_a_validation_error() {
        let mut tracker = tracker_with_ada();
        tracker.login("ada@gmail.com", "abc12!").unwrap();

        let mut input = bus(1.0);
        input.amount = None;
        assert_eq!(
            tracker.add_activity(&input, Utc::now()).unwrap_err(),
            TrackerError::validation("Please enter a valid amount")
        );
        assert!(tracker.list_activities(ActivityOrder::Oldest).unwrap().is_empty());
    }

    #[test]
    fn overflowing_activity_is_not_stored() {
        let mut tracker = tracker_with_ada();
        tracker.login("ada@gmail.com", "abc12!").unwrap();

        let input = ActivityInput {
            category: "Food".to_string(),
            subcategory: "Beef".to_string(),
            amount: Some(1e307),
            modifiers: Modifiers::default(),
        };
        assert!(matches!(
            tracker.add_activity(&input, Utc::now()),
            Err(TrackerError::Validation(_))
        ));
        assert!(tracker.list_activities(ActivityOrder::Oldest).unwrap().is_empty());
    }

    #[test]
    fn activities_belong_to_their_owner() {
        let mut tracker = tracker_with_ada();
        tracker
            .signup("Grace", "grace@gmail.com", "xyz34!", Utc::now())
            .unwrap();

        tracker.login("ada@gmail.com", "abc12!").unwrap();
        tracker.add_activity(&bus(10.0), Utc::now()).unwrap();

        tracker.login("grace@gmail.com", "xyz34!").unwrap();
        assert!(tracker.list_activities(ActivityOrder::Oldest).unwrap().is_empty());
    }

    #[test]
    fn stale_session_does_not_resolve() {
        let mut data = TrackerData::default();
        data.current_user = Some(SessionUser {
            id: "missing".to_string(),
            name: "Ghost".to_string(),
            email: "ghost@gmail.com".to_string(),
        });
        let tracker = Tracker::new(data);
        assert!(tracker.current_user().is_none());
    }
}
