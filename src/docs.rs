use utoipa::OpenApi;

use crate::conversations::Conversation;
use crate::models::{
    Activity, ActivityStatus, AuthUser, Contact, Guide, GuideStatus, Message, Profile, Role,
    Student, StudentProgress, TeacherClass,
};
use crate::progress::{ClassOverview, ProgressSummary, StatusBreakdown};
use crate::types::{
    ActivityForm, AssignmentForm, ContactForm, GuideForm, LoginRequest, LoginResponse,
    MessageForm, SignupConflict, SignupRequest, SignupResponse, StatusUpdate, StudentForm,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::auth::signup,
        crate::routes::auth::login,
        crate::routes::auth::logout
    ),
    components(schemas(
        Role,
        Profile,
        AuthUser,
        Student,
        Contact,
        Guide,
        GuideStatus,
        Activity,
        ActivityStatus,
        Message,
        TeacherClass,
        StudentProgress,
        Conversation,
        ProgressSummary,
        StatusBreakdown,
        ClassOverview,
        SignupRequest,
        SignupResponse,
        SignupConflict,
        LoginRequest,
        LoginResponse,
        StudentForm,
        GuideForm,
        ActivityForm,
        StatusUpdate,
        MessageForm,
        AssignmentForm,
        ContactForm
    )),
    tags((name = "auth", description = "Account signup and sessions"))
)]
pub struct ApiDoc;
