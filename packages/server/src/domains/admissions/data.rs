use juniper::GraphQLObject;

use crate::domains::admissions::models::{College, CollegeSection};

#[derive(Debug, Clone, GraphQLObject)]
pub struct CollegeData {
    pub id: i32,
    pub name: String,
    pub region: String,
    pub category: String,
    pub city: String,
    pub description: String,
    /// Listed image or a placeholder
    pub image: String,
    pub website: String,
}

impl From<&College> for CollegeData {
    fn from(college: &College) -> Self {
        Self {
            id: college.id,
            name: college.name.clone(),
            region: college.region.clone(),
            category: college.category.clone(),
            city: college.city.clone(),
            description: college.description.clone(),
            image: college.image_url(),
            website: college.website.clone(),
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct CollegeListData {
    pub total: i32,
    pub colleges: Vec<CollegeData>,
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct CollegeSectionData {
    pub section: CollegeSection,
    pub label: String,
}
