//! GraphQL schema definition.

use super::context::GraphQLContext;
use juniper::{EmptySubscription, FieldError, FieldResult, RootNode};

use crate::domains::admissions::data::{CollegeListData, CollegeSectionData};
use crate::domains::admissions::edges::query as admissions_query;
use crate::domains::admissions::models::CollegeSection;
use crate::domains::auth::data::{
    ActionResult, AuthPayload, SignUpInput, VerificationData, ViewerData,
};
use crate::domains::auth::edges::{mutation as auth_mutation, query as auth_query};
use crate::domains::content::data::{ContactInfoData, ServiceData};
use crate::domains::content::edges::query as content_query;
use crate::domains::content::models::{Clients, Testimonial};
use crate::domains::inquiries::data::{BookingFormInput, ContactFormInput, InquiryResult};
use crate::domains::inquiries::edges::mutation as inquiries_mutation;

/// Surface an action error as a GraphQL error with the user-facing message
pub fn to_field_error(e: anyhow::Error) -> FieldError {
    FieldError::new(e.to_string(), juniper::Value::null())
}

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    // =========================================================================
    // Site content
    // =========================================================================

    /// Services offered, with their detail pages merged in
    fn services(ctx: &GraphQLContext) -> Vec<ServiceData> {
        content_query::services(ctx)
    }

    /// One service by id, or null
    fn service(ctx: &GraphQLContext, id: String) -> Option<ServiceData> {
        content_query::service(ctx, &id)
    }

    fn testimonials(ctx: &GraphQLContext) -> Vec<Testimonial> {
        content_query::testimonials(ctx)
    }

    fn clients(ctx: &GraphQLContext) -> Clients {
        content_query::clients(ctx)
    }

    /// Contact channels shown in the footer and contact page
    fn contact_info(ctx: &GraphQLContext) -> ContactInfoData {
        content_query::contact_info(ctx)
    }

    // =========================================================================
    // Admissions
    // =========================================================================

    /// Colleges in a section, optionally narrowed by a case-insensitive search
    fn colleges(
        ctx: &GraphQLContext,
        section: Option<CollegeSection>,
        query: Option<String>,
    ) -> CollegeListData {
        admissions_query::colleges(ctx, section, query)
    }

    fn college_sections() -> Vec<CollegeSectionData> {
        admissions_query::college_sections()
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Signed-in account, null for anonymous callers
    async fn viewer(ctx: &GraphQLContext) -> FieldResult<Option<ViewerData>> {
        auth_query::viewer(ctx).await
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    // =========================================================================
    // Email and Google sign-in
    // =========================================================================

    async fn sign_up_with_email(
        ctx: &GraphQLContext,
        input: SignUpInput,
    ) -> FieldResult<AuthPayload> {
        auth_mutation::sign_up_with_email(ctx, input).await
    }

    async fn sign_in_with_email(
        ctx: &GraphQLContext,
        email: String,
        password: String,
    ) -> FieldResult<AuthPayload> {
        auth_mutation::sign_in_with_email(ctx, email, password).await
    }

    /// Sign in with a Google ID token obtained by the client
    async fn sign_in_with_google(
        ctx: &GraphQLContext,
        id_token: String,
    ) -> FieldResult<AuthPayload> {
        auth_mutation::sign_in_with_google(ctx, id_token).await
    }

    // =========================================================================
    // Phone
    // =========================================================================

    async fn send_phone_otp(
        ctx: &GraphQLContext,
        phone_number: String,
        recaptcha_token: Option<String>,
    ) -> FieldResult<VerificationData> {
        auth_mutation::send_phone_otp(ctx, phone_number, recaptcha_token).await
    }

    async fn confirm_phone_otp(
        ctx: &GraphQLContext,
        verification_id: String,
        code: String,
    ) -> FieldResult<AuthPayload> {
        auth_mutation::confirm_phone_otp(ctx, verification_id, code).await
    }

    /// Send a code to a phone that will be linked to the signed-in account
    async fn send_phone_otp_for_linking(
        ctx: &GraphQLContext,
        phone_number: String,
        recaptcha_token: Option<String>,
    ) -> FieldResult<VerificationData> {
        auth_mutation::send_phone_otp_for_linking(ctx, phone_number, recaptcha_token).await
    }

    async fn confirm_phone_link(
        ctx: &GraphQLContext,
        verification_id: String,
        code: String,
    ) -> FieldResult<AuthPayload> {
        auth_mutation::confirm_phone_link(ctx, verification_id, code).await
    }

    // =========================================================================
    // Multi-factor
    // =========================================================================

    async fn start_mfa_enrollment(
        ctx: &GraphQLContext,
        phone_number: String,
        recaptcha_token: Option<String>,
    ) -> FieldResult<VerificationData> {
        auth_mutation::start_mfa_enrollment(ctx, phone_number, recaptcha_token).await
    }

    async fn complete_mfa_enrollment(
        ctx: &GraphQLContext,
        verification_id: String,
        code: String,
        display_name: Option<String>,
    ) -> FieldResult<ViewerData> {
        auth_mutation::complete_mfa_enrollment(ctx, verification_id, code, display_name).await
    }

    async fn start_mfa_sign_in(
        ctx: &GraphQLContext,
        pending_credential: String,
        enrollment_id: String,
        recaptcha_token: Option<String>,
    ) -> FieldResult<VerificationData> {
        auth_mutation::start_mfa_sign_in(ctx, pending_credential, enrollment_id, recaptcha_token)
            .await
    }

    async fn finalize_mfa_sign_in(
        ctx: &GraphQLContext,
        pending_credential: String,
        verification_id: String,
        code: String,
    ) -> FieldResult<AuthPayload> {
        auth_mutation::finalize_mfa_sign_in(ctx, pending_credential, verification_id, code).await
    }

    // =========================================================================
    // Recovery and session
    // =========================================================================

    async fn send_password_reset(ctx: &GraphQLContext, email: String) -> FieldResult<ActionResult> {
        auth_mutation::send_password_reset(ctx, email).await
    }

    async fn resend_email_verification(ctx: &GraphQLContext) -> FieldResult<bool> {
        auth_mutation::resend_email_verification(ctx).await
    }

    async fn sign_out(ctx: &GraphQLContext) -> FieldResult<bool> {
        auth_mutation::sign_out(ctx).await
    }

    // =========================================================================
    // Inquiries
    // =========================================================================

    /// Validate a contact form and forward it to the contact webhook
    async fn submit_contact(
        ctx: &GraphQLContext,
        input: ContactFormInput,
    ) -> FieldResult<InquiryResult> {
        inquiries_mutation::submit_contact(ctx, input).await
    }

    /// Validate a consultation booking and forward it to the booking webhook
    async fn submit_booking(
        ctx: &GraphQLContext,
        input: BookingFormInput,
    ) -> FieldResult<InquiryResult> {
        inquiries_mutation::submit_booking(ctx, input).await
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
