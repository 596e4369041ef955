use juniper::FieldResult;

use crate::domains::inquiries::actions;
use crate::domains::inquiries::data::{BookingFormInput, ContactFormInput, InquiryResult};
use crate::server::graphql::{to_field_error, GraphQLContext};

pub async fn submit_contact(ctx: &GraphQLContext, input: ContactFormInput) -> FieldResult<InquiryResult> {
    actions::submit_contact(input.into(), &ctx.deps)
        .await
        .map(Into::into)
        .map_err(to_field_error)
}

pub async fn submit_booking(ctx: &GraphQLContext, input: BookingFormInput) -> FieldResult<InquiryResult> {
    actions::submit_booking(input.into(), &ctx.deps)
        .await
        .map(Into::into)
        .map_err(to_field_error)
}
