use crate::domains::admissions::data::{CollegeData, CollegeListData, CollegeSectionData};
use crate::domains::admissions::models::CollegeSection;
use crate::server::graphql::GraphQLContext;

pub fn colleges(
    ctx: &GraphQLContext,
    section: Option<CollegeSection>,
    query: Option<String>,
) -> CollegeListData {
    let colleges: Vec<CollegeData> = ctx
        .deps
        .colleges
        .filter(section.unwrap_or(CollegeSection::All), query.as_deref())
        .into_iter()
        .map(CollegeData::from)
        .collect();

    CollegeListData {
        total: colleges.len() as i32,
        colleges,
    }
}

pub fn college_sections() -> Vec<CollegeSectionData> {
    CollegeSection::ALL
        .iter()
        .map(|section| CollegeSectionData {
            section: *section,
            label: section.label().to_string(),
        })
        .collect()
}
