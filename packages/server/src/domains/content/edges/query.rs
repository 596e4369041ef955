use crate::domains::content::data::{ContactInfoData, ServiceData};
use crate::domains::content::models::{Clients, Testimonial};
use crate::server::graphql::GraphQLContext;

pub fn services(ctx: &GraphQLContext) -> Vec<ServiceData> {
    let catalog = &ctx.deps.content;
    catalog
        .services()
        .iter()
        .filter_map(|s| catalog.service(&s.id))
        .map(|(service, detail)| ServiceData::new(service, detail))
        .collect()
}

pub fn service(ctx: &GraphQLContext, id: &str) -> Option<ServiceData> {
    ctx.deps
        .content
        .service(id)
        .map(|(service, detail)| ServiceData::new(service, detail))
}

pub fn testimonials(ctx: &GraphQLContext) -> Vec<Testimonial> {
    ctx.deps.content.testimonials().to_vec()
}

pub fn clients(ctx: &GraphQLContext) -> Clients {
    ctx.deps.content.clients().clone()
}

pub fn contact_info(ctx: &GraphQLContext) -> ContactInfoData {
    ContactInfoData::from(&ctx.deps.site)
}
