use juniper::GraphQLObject;

use crate::config::SiteSettings;
use crate::domains::content::models::{
    DetailSection, ProcessStep, Service, ServiceDetail, Stat,
};
use crate::domains::inquiries::models::whatsapp_url;

/// A service card plus its detail page
#[derive(Debug, Clone, GraphQLObject)]
pub struct ServiceData {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub tagline: String,
    pub summary: String,
    pub features: Vec<String>,
    pub color: String,
    pub overview: String,
    pub sections: Vec<DetailSection>,
    pub stats: Vec<Stat>,
    pub process: Vec<ProcessStep>,
}

impl ServiceData {
    pub fn new(service: &Service, detail: &ServiceDetail) -> Self {
        Self {
            id: service.id.clone(),
            title: service.title.clone(),
            icon: service.icon.clone(),
            tagline: service.tagline.clone(),
            summary: service.summary.clone(),
            features: service.features.clone(),
            color: detail.color.clone(),
            overview: detail.overview.clone(),
            sections: detail.sections.clone(),
            stats: detail.stats.clone(),
            process: detail.process.clone(),
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
#[graphql(description = "How to reach TechMatch")]
pub struct ContactInfoData {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub whatsapp_number: String,
    /// wa.me link with the default greeting
    pub whatsapp_url: String,
}

impl From<&SiteSettings> for ContactInfoData {
    fn from(site: &SiteSettings) -> Self {
        Self {
            email: site.contact_email.clone(),
            phone: site.contact_phone.clone(),
            address: site.contact_address.clone(),
            whatsapp_number: site.whatsapp_number.clone(),
            whatsapp_url: whatsapp_url(&site.whatsapp_number, &site.whatsapp_message),
        }
    }
}
