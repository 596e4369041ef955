use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domains::content::models::embedded_text;

#[derive(Debug, Clone, Deserialize)]
pub struct College {
    pub id: i32,
    pub name: String,
    pub region: String,
    pub category: String,
    pub city: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub website: String,
}

impl College {
    /// Listed image, or a stock photo searched by city (region when the
    /// city is blank)
    pub fn image_url(&self) -> String {
        if let Some(image) = self.image.as_deref().filter(|i| !i.trim().is_empty()) {
            return image.to_string();
        }

        let place = if self.city.trim().is_empty() {
            &self.region
        } else {
            &self.city
        };
        format!(
            "https://source.unsplash.com/800x600/?college,{}&sig={}",
            urlencoding::encode(place),
            self.id
        )
    }
}

/// Directory tabs on the admissions page
#[derive(Debug, Clone, Copy, PartialEq, Eq, juniper::GraphQLEnum)]
pub enum CollegeSection {
    All,
    CollegesInBangalore,
    UniversitiesInBangalore,
    UniversitiesInTelangana,
    UniversitiesInChennai,
    NorthUniversities,
}

impl CollegeSection {
    pub const ALL: [CollegeSection; 6] = [
        Self::All,
        Self::CollegesInBangalore,
        Self::UniversitiesInBangalore,
        Self::UniversitiesInTelangana,
        Self::UniversitiesInChennai,
        Self::NorthUniversities,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::CollegesInBangalore => "Colleges in Bangalore",
            Self::UniversitiesInBangalore => "Universities in Bangalore",
            Self::UniversitiesInTelangana => "Universities in Telangana",
            Self::UniversitiesInChennai => "Universities in Chennai",
            Self::NorthUniversities => "North Universities",
        }
    }

    /// Catalog category listed under this tab
    pub fn category(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::CollegesInBangalore => Some("Top Colleges in Bangalore"),
            Self::UniversitiesInBangalore => Some("Top Universities in Bangalore"),
            Self::UniversitiesInTelangana => Some("Top Universities in Telangana"),
            Self::UniversitiesInChennai => Some("Top Universities in Chennai"),
            Self::NorthUniversities => Some("North Universities"),
        }
    }

    pub fn matches(&self, college: &College) -> bool {
        let Some(category) = self.category() else {
            return true;
        };
        if college.category == category {
            return true;
        }

        if *self == Self::UniversitiesInTelangana {
            let region = college.region.trim().to_lowercase();
            let city = college.city.trim().to_lowercase();
            return region == "telangana" || region == "hyderabad" || city == "hyderabad";
        }

        false
    }
}

/// Colleges in catalog order
#[derive(Debug, Clone)]
pub struct CollegeDirectory {
    colleges: Vec<College>,
}

impl CollegeDirectory {
    pub fn load() -> Result<Self> {
        Self::from_json(&embedded_text("colleges.json")?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let colleges: Vec<College> =
            serde_json::from_str(json).context("Invalid colleges content")?;
        Ok(Self { colleges })
    }

    pub fn all(&self) -> &[College] {
        &self.colleges
    }

    /// Section filter, then a case-insensitive name match on the trimmed
    /// query. A blank query matches everything.
    pub fn filter(&self, section: CollegeSection, query: Option<&str>) -> Vec<&College> {
        let needle = query
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        self.colleges
            .iter()
            .filter(|c| section.matches(c))
            .filter(|c| match &needle {
                Some(needle) => c.name.to_lowercase().contains(needle),
                None => true,
            })
            .collect()
    }
}
