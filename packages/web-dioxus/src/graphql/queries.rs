//! GraphQL query definitions

// ============================================================================
// CONTENT
// ============================================================================

pub const GET_SERVICES: &str = r#"
  query GetServices {
    services {
      id
      title
      icon
      tagline
      summary
      features
      color
      overview
      sections { title description benefits }
      stats { number label }
      process { step title description }
    }
  }
"#;

pub const GET_SERVICE: &str = r#"
  query GetService($id: String!) {
    service(id: $id) {
      id
      title
      icon
      tagline
      summary
      features
      color
      overview
      sections { title description benefits }
      stats { number label }
      process { step title description }
    }
  }
"#;

pub const GET_TESTIMONIALS: &str = r#"
  query GetTestimonials {
    testimonials {
      id
      name
      role
      company
      text
      rating
    }
  }
"#;

pub const GET_CLIENTS: &str = r#"
  query GetClients {
    clients {
      categories { name sectors }
      caseStudies { title company challenge solution result badge }
    }
  }
"#;

pub const GET_CONTACT_INFO: &str = r#"
  query GetContactInfo {
    contactInfo {
      email
      phone
      address
      whatsappNumber
      whatsappUrl
    }
  }
"#;

// ============================================================================
// ADMISSIONS
// ============================================================================

pub const GET_COLLEGES: &str = r#"
  query GetColleges($section: CollegeSection, $query: String) {
    colleges(section: $section, query: $query) {
      total
      colleges {
        id
        name
        region
        category
        city
        description
        image
        website
      }
    }
  }
"#;

pub const GET_COLLEGE_SECTIONS: &str = r#"
  query GetCollegeSections {
    collegeSections {
      section
      label
    }
  }
"#;

// ============================================================================
// ACCOUNT
// ============================================================================

pub const GET_VIEWER: &str = r#"
  query GetViewer {
    viewer {
      uid
      email
      emailVerified
      displayName
      photoUrl
      phoneNumber
      providers
      mfaFactors { enrollmentId displayName phoneHint }
    }
  }
"#;
