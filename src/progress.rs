use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Activity, ActivityStatus, StudentProgress, TeacherClass};

/// Percentage of completed activities; 0 for an empty set.
pub fn completion_rate(activities: &[Activity]) -> f64 {
    if activities.is_empty() {
        return 0.0;
    }
    let completed = activities.iter().filter(|a| a.is_completed()).count();
    completed as f64 / activities.len() as f64 * 100.0
}

/// Mean of the scores that are present; 0 when nothing is scored.
pub fn average_score(activities: &[Activity]) -> f64 {
    let scores: Vec<f64> = activities
        .iter()
        .filter_map(|a| a.score)
        .filter(|s| s.is_finite())
        .collect();
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct StatusBreakdown {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusBreakdown {
    pub fn of(activities: &[Activity]) -> Self {
        let count = |status: ActivityStatus| activities.iter().filter(|a| a.status == status).count();
        StatusBreakdown {
            total: activities.len(),
            pending: count(ActivityStatus::Pending),
            in_progress: count(ActivityStatus::InProgress),
            completed: count(ActivityStatus::Completed),
        }
    }

    pub fn count(&self, status: ActivityStatus) -> usize {
        match status {
            ActivityStatus::Pending => self.pending,
            ActivityStatus::InProgress => self.in_progress,
            ActivityStatus::Completed => self.completed,
        }
    }

    pub fn percentage(&self, status: ActivityStatus) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(status) as f64 / self.total as f64 * 100.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct ProgressSummary {
    pub total_activities: usize,
    pub completed_activities: usize,
    pub completion_rate: f64,
    pub average_score: f64,
    pub breakdown: StatusBreakdown,
}

impl ProgressSummary {
    pub fn of(activities: &[Activity]) -> Self {
        let breakdown = StatusBreakdown::of(activities);
        ProgressSummary {
            total_activities: breakdown.total,
            completed_activities: breakdown.completed,
            completion_rate: completion_rate(activities),
            average_score: average_score(activities),
            breakdown,
        }
    }
}

/// Teacher-side figures over the provider's precomputed progress rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct ClassOverview {
    pub class_count: usize,
    pub total_students: u32,
    /// Rounded mean of each student's completion percentage.
    pub average_completion: u32,
}

impl ClassOverview {
    pub fn of(classes: &[TeacherClass], progress: &[StudentProgress]) -> Self {
        ClassOverview {
            class_count: classes.len(),
            total_students: classes.iter().map(|c| c.student_count).sum(),
            average_completion: average_completion(progress),
        }
    }
}

pub fn student_completion(progress: &StudentProgress) -> f64 {
    if progress.total_activities == 0 {
        return 0.0;
    }
    progress.completed_activities as f64 / progress.total_activities as f64 * 100.0
}

fn average_completion(progress: &[StudentProgress]) -> u32 {
    if progress.is_empty() {
        return 0;
    }
    let sum: f64 = progress.iter().map(student_completion).sum();
    (sum / progress.len() as f64).round() as u32
}
