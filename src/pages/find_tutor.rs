use lazy_static::lazy_static;
use serde::Serialize;

use crate::types::TutorQuery;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tutor {
    pub id: u32,
    pub name: &'static str,
    pub age: u8,
    pub university: &'static str,
    pub major: &'static str,
    pub rating: f32,
    pub reviews: u32,
    pub hourly_rate: u32,
    pub location: &'static str,
    pub subjects: Vec<&'static str>,
    pub experience: &'static str,
    pub bio: &'static str,
    pub verified: bool,
    pub background_check: bool,
    pub languages: Vec<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn option(value: &'static str, label: &'static str) -> FilterOption {
    FilterOption { value, label }
}

pub const AGE_GROUPS: [FilterOption; 4] = [
    option("0-2", "0-2 years"),
    option("3-4", "3-4 years"),
    option("5-6", "5-6 years"),
    option("7", "7 years"),
];

pub const SUBJECTS: [FilterOption; 6] = [
    option("math", "Math"),
    option("reading", "Reading"),
    option("science", "Science"),
    option("art", "Art & Creativity"),
    option("music", "Music"),
    option("social", "Social Skills"),
];

lazy_static! {
    static ref TUTORS: Vec<Tutor> = vec![
        Tutor {
            id: 1,
            name: "Dhiraj choudhary",
            age: 20,
            university: "heritage",
            major: "Elementary Education",
            rating: 4.9,
            reviews: 47,
            hourly_rate: 25,
            location: "Palo Alto, CA",
            subjects: vec!["Math", "Reading", "Science"],
            experience: "2 years",
            bio: "I absolutely love working with young children. I believe learning should be fun and engaging!",
            verified: true,
            background_check: true,
            languages: vec!["English", "Spanish"],
        },
        Tutor {
            id: 2,
            name: "Michael Chen",
            age: 21,
            university: "UC Berkeley",
            major: "Child Psychology",
            rating: 4.8,
            reviews: 32,
            hourly_rate: 28,
            location: "Berkeley, CA",
            subjects: vec!["Math", "Art", "Music"],
            experience: "1.5 years",
            bio: "Creative and patient tutor who loves making learning an adventure. Specializes in hands-on activities!",
            verified: true,
            background_check: true,
            languages: vec!["English", "Mandarin"],
        },
        Tutor {
            id: 3,
            name: "Emma Rodriguez",
            age: 19,
            university: "UCLA",
            major: "Early Childhood Development",
            rating: 5.0,
            reviews: 28,
            hourly_rate: 30,
            location: "Los Angeles, CA",
            subjects: vec!["Reading", "Writing", "Social Skills"],
            experience: "1 year",
            bio: "Passionate about helping children build confidence and discover their love for learning through play-based activities.",
            verified: true,
            background_check: true,
            languages: vec!["English", "Spanish"],
        },
        Tutor {
            id: 4,
            name: "Alex Johnson",
            age: 22,
            university: "San Jose State",
            major: "Mathematics Education",
            rating: 4.7,
            reviews: 41,
            hourly_rate: 26,
            location: "San Jose, CA",
            subjects: vec!["Math", "Logic Games", "Problem Solving"],
            experience: "3 years",
            bio: "Making math fun and accessible for young minds! I use games and visual aids to build strong foundations.",
            verified: true,
            background_check: true,
            languages: vec!["English"],
        },
    ];
}

#[derive(Debug, Serialize)]
pub struct FindTutorView {
    pub age_groups: &'static [FilterOption],
    pub subjects: &'static [FilterOption],
    pub tutors: Vec<Tutor>,
}

pub struct FindTutorPage;

impl FindTutorPage {
    pub fn load(query: &TutorQuery) -> FindTutorView {
        let subject = needle(&query.subject);
        let location = needle(&query.location);
        let text = needle(&query.q);

        let tutors = TUTORS
            .iter()
            .filter(|tutor| {
                subject.as_deref().map_or(true, |s| {
                    tutor.subjects.iter().any(|t| t.to_lowercase().contains(s))
                })
            })
            .filter(|tutor| {
                location
                    .as_deref()
                    .map_or(true, |l| tutor.location.to_lowercase().contains(l))
            })
            .filter(|tutor| text.as_deref().map_or(true, |q| tutor.mentions(q)))
            .cloned()
            .collect();

        FindTutorView {
            age_groups: &AGE_GROUPS,
            subjects: &SUBJECTS,
            tutors,
        }
    }
}

impl Tutor {
    fn mentions(&self, needle: &str) -> bool {
        [self.name, self.university, self.major, self.bio]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

fn needle(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}
