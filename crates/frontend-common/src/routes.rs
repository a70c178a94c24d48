//! Application routes and the role guard in front of them

use crate::auth::SessionState;
use crate::config::AuthConfig;
use aula_core::{RecordId, Role};

const STAFF: &[Role] = &[Role::Teacher, Role::Administrator];
const ADMINISTRATION: &[Role] = &[Role::Administrator];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Students,
    StudentDetail(RecordId),
    Subjects,
    Attendance,
    Grades,
    Participations,
    Reports,
    Users,
    Courses,
    Settings,
    Unauthorized,
    NotFound(String),
}

impl Route {
    /// Map a path to its route; unknown paths become [`Route::NotFound`]
    pub fn recognize(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = trimmed.trim_end_matches('/');
        match trimmed {
            "" => Self::Dashboard,
            "/login" => Self::Login,
            "/students" => Self::Students,
            "/subjects" => Self::Subjects,
            "/attendance" => Self::Attendance,
            "/grades" => Self::Grades,
            "/participations" => Self::Participations,
            "/reports" => Self::Reports,
            "/users" => Self::Users,
            "/courses" => Self::Courses,
            "/settings" => Self::Settings,
            "/unauthorized" => Self::Unauthorized,
            other => other
                .strip_prefix("/student/")
                .and_then(|id| id.parse().ok())
                .map_or_else(|| Self::NotFound(path.to_string()), Self::StudentDetail),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => AuthConfig::LOGIN_ROUTE.to_string(),
            Self::Dashboard => AuthConfig::HOME_ROUTE.to_string(),
            Self::Students => "/students".to_string(),
            Self::StudentDetail(id) => format!("/student/{id}"),
            Self::Subjects => "/subjects".to_string(),
            Self::Attendance => "/attendance".to_string(),
            Self::Grades => "/grades".to_string(),
            Self::Participations => "/participations".to_string(),
            Self::Reports => "/reports".to_string(),
            Self::Users => "/users".to_string(),
            Self::Courses => "/courses".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::Unauthorized => AuthConfig::UNAUTHORIZED_ROUTE.to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// Whether the route is behind login
    pub const fn is_protected(&self) -> bool {
        !matches!(self, Self::Login | Self::Unauthorized | Self::NotFound(_))
    }

    /// Roles allowed on the route; `None` means any signed-in user
    pub const fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Self::Students
            | Self::StudentDetail(_)
            | Self::Subjects
            | Self::Attendance
            | Self::Grades
            | Self::Participations
            | Self::Reports => Some(STAFF),
            Self::Users | Self::Courses | Self::Settings => Some(ADMINISTRATION),
            _ => None,
        }
    }

    pub fn permits(&self, role: Role) -> bool {
        self.allowed_roles()
            .is_none_or(|roles| roles.contains(&role))
    }
}

/// Outcome of checking a route against the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// Send to login, remembering where the user wanted to go
    RedirectToLogin { from: String },
    Unauthorized,
}

pub fn guard(route: &Route, state: &SessionState) -> GuardDecision {
    if !route.is_protected() {
        return GuardDecision::Render;
    }
    if !state.is_authenticated() {
        return GuardDecision::RedirectToLogin { from: route.path() };
    }
    match &state.current_user {
        Some(user) if !route.permits(user.role) => GuardDecision::Unauthorized,
        _ => GuardDecision::Render,
    }
}

/// Sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub title: &'static str,
    pub path: &'static str,
}

const NAVIGATION: &[(NavItem, Option<&[Role]>)] = &[
    (NavItem { title: "Dashboard", path: "/" }, None),
    (NavItem { title: "Students", path: "/students" }, Some(STAFF)),
    (NavItem { title: "Subjects", path: "/subjects" }, Some(STAFF)),
    (NavItem { title: "Attendance", path: "/attendance" }, Some(STAFF)),
    (NavItem { title: "Grades", path: "/grades" }, Some(STAFF)),
    (NavItem { title: "Participations", path: "/participations" }, Some(STAFF)),
    (NavItem { title: "Reports", path: "/reports" }, Some(STAFF)),
    (NavItem { title: "Users", path: "/users" }, Some(ADMINISTRATION)),
    (NavItem { title: "Courses", path: "/courses" }, Some(ADMINISTRATION)),
    (NavItem { title: "Settings", path: "/settings" }, Some(ADMINISTRATION)),
];

/// Sidebar entries visible to `role`, in display order
pub fn navigation_items(role: Role) -> Vec<NavItem> {
    NAVIGATION
        .iter()
        .filter(|(_, roles)| roles.is_none_or(|roles| roles.contains(&role)))
        .map(|(item, _)| *item)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthAction, Session};
    use aula_core::User;

    fn signed_in(role: Role) -> SessionState {
        SessionState::default().reduce(AuthAction::LoginSuccess(Session {
            user: User {
                id: 1,
                username: "u1".to_string(),
                email: String::new(),
                first_name: String::new(),
                last_name: String::new(),
                role,
                is_active: true,
                profile: None,
            },
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
        }))
    }

    #[test]
    fn test_recognize_and_path_agree() {
        for path in ["/", "/students", "/student/42", "/settings", "/login"] {
            assert_eq!(Route::recognize(path).path(), path);
        }
        assert_eq!(Route::recognize("/grades/?page=2"), Route::Grades);
        assert_eq!(
            Route::recognize("/student/abc"),
            Route::NotFound("/student/abc".to_string())
        );
    }

    #[test]
    fn test_anonymous_is_sent_to_login_with_origin() {
        let state = SessionState::default().reduce(AuthAction::Logout);
        assert_eq!(
            guard(&Route::StudentDetail(9), &state),
            GuardDecision::RedirectToLogin {
                from: "/student/9".to_string()
            }
        );
        assert_eq!(guard(&Route::Login, &state), GuardDecision::Render);
        assert_eq!(
            guard(&Route::NotFound("/nope".into()), &state),
            GuardDecision::Render
        );
    }

    #[test]
    fn test_role_restrictions() {
        let student = signed_in(Role::Student);
        assert_eq!(guard(&Route::Dashboard, &student), GuardDecision::Render);
        assert_eq!(guard(&Route::Grades, &student), GuardDecision::Unauthorized);

        let teacher = signed_in(Role::Teacher);
        assert_eq!(guard(&Route::Grades, &teacher), GuardDecision::Render);
        assert_eq!(guard(&Route::Users, &teacher), GuardDecision::Unauthorized);

        let admin = signed_in(Role::Administrator);
        assert_eq!(guard(&Route::Settings, &admin), GuardDecision::Render);
        assert_eq!(guard(&Route::Reports, &admin), GuardDecision::Render);
    }

    #[test]
    fn test_navigation_follows_route_permissions() {
        let student: Vec<_> = navigation_items(Role::Student)
            .iter()
            .map(|item| item.path)
            .collect();
        assert_eq!(student, vec!["/"]);

        assert_eq!(navigation_items(Role::Teacher).len(), 7);
        assert_eq!(navigation_items(Role::Administrator).len(), 10);

        for item in navigation_items(Role::Teacher) {
            assert!(Route::recognize(item.path).permits(Role::Teacher));
        }
    }
}
