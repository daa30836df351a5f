//! Static marketing pages and the contact form.

use serde::Serialize;
use tracing::info;

use crate::error::{require, AppError};
use crate::types::ContactForm;

#[derive(Clone, Debug, Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

const fn feature(title: &'static str, description: &'static str) -> Feature {
    Feature { title, description }
}

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub headline: &'static str,
    pub highlights: [&'static str; 3],
    pub features: [Feature; 4],
    pub safety: [Feature; 4],
    pub call_to_action: &'static str,
}

pub fn home() -> HomeView {
    HomeView {
        headline: "Growing Bright Futures Together!",
        highlights: ["100% Safe & Verified", "4.9/5 Parent Rating", "500+ Happy Families"],
        features: [
            feature("Home Learning", "Safe, comfortable environment for your child"),
            feature("College Mentors", "Young, energetic tutors who connect with kids"),
            feature("Personalized", "Tailored learning plans for each child"),
            feature("Fun Learning", "Making education enjoyable and engaging"),
        ],
        safety: [
            feature(
                "Background Verified",
                "Comprehensive background checks and reference verification for every mentor",
            ),
            feature(
                "Parent Supervised",
                "All sessions happen in your home with you present and in control",
            ),
            feature(
                "Flexible Scheduling",
                "Sessions work around your family's schedule and comfort level",
            ),
            feature(
                "Continuous Training",
                "Ongoing education and safety training for all our mentors",
            ),
        ],
        call_to_action: "First session free. No setup fees. Cancel anytime.",
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TeamMember {
    pub name: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AboutView {
    pub headline: &'static str,
    pub pillars: [Feature; 3],
    pub values: [&'static str; 3],
    pub team: [TeamMember; 3],
}

pub fn about() -> AboutView {
    AboutView {
        headline: "Transforming Education One Child at a Time!",
        pillars: [
            feature(
                "Personalized Learning",
                "Every child is unique. Our mentors adapt their teaching style to match each child's personality, interests, and learning pace.",
            ),
            feature(
                "Safety First",
                "Comprehensive background checks, continuous training, and parent-supervised sessions ensure your child's safety and your peace of mind.",
            ),
            feature(
                "Joyful Learning",
                "Our mentors use games, stories, and creative activities to make education an adventure your child looks forward to.",
            ),
        ],
        values: ["Compassion", "Trust", "Excellence"],
        team: [
            TeamMember {
                name: "Sarah Johnson",
                title: "Founder & CEO",
            },
            TeamMember {
                name: "Dr. Michael Chen",
                title: "Head of Curriculum",
            },
            TeamMember {
                name: "Emily Rodriguez",
                title: "Safety & Training Director",
            },
        ],
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

#[derive(Debug, Serialize)]
pub struct ContactView {
    pub phone: &'static str,
    pub email: &'static str,
    pub hours: &'static str,
    pub urgency: [Choice; 4],
    pub subjects: [Choice; 7],
    pub faq: [Feature; 3],
}

pub fn contact() -> ContactView {
    ContactView {
        phone: "+91 62918 98849",
        email: "kidguides01@gmail.com",
        hours: "Mon-Fri: 8am-8pm PST | Sat-Sun: 10am-6pm PST",
        urgency: [
            choice("low", "Low - General inquiry"),
            choice("normal", "Normal - Within 24 hours"),
            choice("high", "High - Same day response"),
            choice("urgent", "Urgent - Call me ASAP"),
        ],
        subjects: [
            choice("find-tutor", "Finding the right tutor"),
            choice("safety", "Safety questions"),
            choice("pricing", "Pricing and packages"),
            choice("scheduling", "Scheduling help"),
            choice("become-tutor", "Becoming a tutor"),
            choice("technical", "Technical support"),
            choice("other", "Other"),
        ],
        faq: [
            feature(
                "How do you ensure tutor safety?",
                "All tutors undergo background checks, reference verification, and safety training.",
            ),
            feature(
                "What ages do you work with?",
                "We specialize in children aged 0-7 years with age-appropriate learning methods.",
            ),
            feature(
                "How much does tutoring cost?",
                "Rates typically depend on the tutor and subjects.",
            ),
        ],
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ContactReceipt {
    pub submitted: bool,
    pub message: &'static str,
}

/// Validates a contact request and acknowledges it. Nothing is delivered.
pub fn submit_contact(form: &ContactForm) -> Result<ContactReceipt, AppError> {
    let (Some(_), Some(email), Some(_)) = (
        require(&form.name),
        require(&form.email),
        require(&form.message),
    ) else {
        return Err(AppError::Validation(
            "Please fill in all required fields".to_string(),
        ));
    };

    info!(
        email,
        subject = require(&form.subject).unwrap_or("other"),
        urgency = require(&form.urgency).unwrap_or("normal"),
        "Contact request received"
    );

    Ok(ContactReceipt {
        submitted: true,
        message: "We've received your message and our team will get back to you within 24 hours.",
    })
}
