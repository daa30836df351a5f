use serde::Serialize;

use crate::middleware::SessionContext;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

const fn link(href: &'static str, label: &'static str) -> NavLink {
    NavLink { href, label }
}

const MAIN_LINKS: [NavLink; 4] = [
    link("/", "Home"),
    link("/about", "About"),
    link("/find-tutor", "Find Tutor"),
    link("/contact", "Contact"),
];

#[derive(Clone, Debug, Serialize)]
pub struct Account {
    pub email: Option<String>,
    pub dashboard: NavLink,
}

#[derive(Clone, Debug, Serialize)]
pub struct FooterSection {
    pub title: &'static str,
    pub links: Vec<NavLink>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Footer {
    pub brand: &'static str,
    pub tagline: &'static str,
    pub sections: Vec<FooterSection>,
    pub legal: Vec<NavLink>,
}

/// Navigation bar and footer around every page.
#[derive(Clone, Debug, Serialize)]
pub struct Layout {
    pub nav: Vec<NavLink>,
    /// Present when signed in; the nav then offers the dashboard and sign-out.
    pub account: Option<Account>,
    /// Login / sign-up links for anonymous visitors. These are front-end
    /// pages; their forms submit to `/api/auth/login` and `/api/auth/signup`.
    pub auth_links: Vec<NavLink>,
    pub footer: Footer,
}

impl Layout {
    pub fn for_session(session: Option<&SessionContext>) -> Self {
        let account = session.map(|session| Account {
            email: session.email.clone(),
            dashboard: link("/dashboard", "Dashboard"),
        });

        let auth_links = if account.is_some() {
            Vec::new()
        } else {
            vec![link("/login", "Login"), link("/signup", "Sign Up")]
        };

        Layout {
            nav: MAIN_LINKS.to_vec(),
            account,
            auth_links,
            footer: footer(),
        }
    }
}

fn footer() -> Footer {
    Footer {
        brand: "KidGuides",
        tagline: "Connecting families with caring college mentors for hands-on, screen-free learning.",
        sections: vec![
            FooterSection {
                title: "Quick Links",
                links: vec![
                    link("/", "Home"),
                    link("/about", "About Us"),
                    link("/find-tutor", "Find a Tutor"),
                    link("/signup", "Get Started"),
                ],
            },
            FooterSection {
                title: "For Parents",
                links: vec![
                    link("/safety", "Safety & Trust"),
                    link("/verified-mentors", "Verified Mentors"),
                    link("/progress-tracking", "Progress Tracking"),
                    link("/testimonials", "Testimonials"),
                ],
            },
        ],
        legal: vec![link("/privacy", "Privacy Policy"), link("/terms", "Terms of Service")],
    }
}

/// A page's own view model wrapped in the shared layout.
#[derive(Serialize)]
pub struct Page<T: Serialize> {
    pub layout: Layout,
    #[serde(flatten)]
    pub content: T,
}

impl<T: Serialize> Page<T> {
    pub fn new(session: Option<&SessionContext>, content: T) -> Self {
        Page {
            layout: Layout::for_session(session),
            content,
        }
    }
}
