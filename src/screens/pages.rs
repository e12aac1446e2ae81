//! Page routing table and admin route guard

use crate::core::auth::AdminRole;
use crate::core::session::AdminSession;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    TrekListings,
    StoryFeed,
    HotelsGuides,
    UserProfile,
    AdminDashboard,
    TrekManagement,
    ContentModeration,
    SafetyManagement,
    AdminLogin,
}

impl Page {
    pub const ALL: [Page; 10] = [
        Page::Home,
        Page::TrekListings,
        Page::StoryFeed,
        Page::HotelsGuides,
        Page::UserProfile,
        Page::AdminDashboard,
        Page::TrekManagement,
        Page::ContentModeration,
        Page::SafetyManagement,
        Page::AdminLogin,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::TrekListings => "/trek-listings",
            Page::StoryFeed => "/story-feed",
            Page::HotelsGuides => "/hotels-guides",
            Page::UserProfile => "/user-profile",
            Page::AdminDashboard => "/admin-dashboard",
            Page::TrekManagement => "/trek-management",
            Page::ContentModeration => "/content-moderation",
            Page::SafetyManagement => "/safety-management",
            Page::AdminLogin => "/admin-login",
        }
    }

    /// Match a request path, ignoring a trailing slash and any query string
    pub fn from_path(path: &str) -> Option<Page> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|page| page.path() == normalized)
    }

    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Page::AdminDashboard
                | Page::TrekManagement
                | Page::ContentModeration
                | Page::SafetyManagement
        )
    }

    /// Page-access table for admin roles
    pub fn allows(&self, role: AdminRole) -> bool {
        match self {
            Page::TrekManagement => role == AdminRole::SuperAdmin,
            Page::ContentModeration => {
                matches!(role, AdminRole::SuperAdmin | AdminRole::ContentModerator)
            }
            Page::SafetyManagement => {
                matches!(role, AdminRole::SuperAdmin | AdminRole::SafetyOfficer)
            }
            _ => true,
        }
    }
}

/// Outcome of resolving a path against the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RouteDecision {
    Render { page: Page },
    Redirect { to: String },
    Forbidden { page: Page, role: AdminRole },
    NotFound { path: String },
}

/// Decide what a navigation to `path` shows
pub fn resolve(path: &str, session: Option<&AdminSession>) -> RouteDecision {
    let Some(page) = Page::from_path(path) else {
        return RouteDecision::NotFound {
            path: path.to_string(),
        };
    };

    match (page, session) {
        (Page::AdminLogin, Some(_)) => RouteDecision::Redirect {
            to: Page::AdminDashboard.path().to_string(),
        },
        (page, None) if page.requires_admin() => RouteDecision::Redirect {
            to: Page::AdminLogin.path().to_string(),
        },
        (page, Some(session)) if page.requires_admin() && !page.allows(session.role) => {
            RouteDecision::Forbidden {
                page,
                role: session.role,
            }
        }
        (page, _) => RouteDecision::Render { page },
    }
}
