pub mod activity;
pub mod class;
pub mod guide;
pub mod message;
pub mod student;
pub mod user;

pub use activity::{Activity, ActivityStatus, NewActivity};
pub use class::{StudentProgress, TeacherClass};
pub use guide::{Guide, GuideStatus, NewGuide};
pub use message::{Message, NewMessage};
pub use student::{Contact, NewStudent, Student};
pub use user::{AuthUser, Profile, Role};
