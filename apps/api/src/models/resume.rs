use serde::{Deserialize, Serialize};

/// Structured résumé consumed by the renderer.
///
/// Produced upstream; the renderer only lays this text out and never adds or drops
/// facts. Every collection defaults to empty so partial documents deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredResume {
    pub header: ResumeHeader,
    #[serde(default)]
    pub summary: Vec<String>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeHeader {
    pub name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

impl ResumeHeader {
    /// Non-blank contact fields in display order: location, phone, email, links.
    pub fn contact_parts(&self) -> Vec<&str> {
        [&self.location, &self.phone, &self.email]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .chain(self.links.iter().map(String::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub dates: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub dates: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub dates: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document_deserializes_with_defaults() {
        let resume: StructuredResume =
            serde_json::from_str(r#"{"header":{"name":"Ada Lovelace"}}"#).unwrap();
        assert_eq!(resume.header.name, "Ada Lovelace");
        assert!(resume.summary.is_empty());
        assert!(resume.experience.is_empty());
        assert!(resume.header.links.is_empty());
    }

    #[test]
    fn test_contact_parts_skip_blank_fields_in_order() {
        let header = ResumeHeader {
            name: "Ada".into(),
            headline: None,
            location: Some("London".into()),
            phone: Some("  ".into()),
            email: Some("ada@example.com".into()),
            links: vec!["github.com/ada".into(), "".into()],
        };
        assert_eq!(
            header.contact_parts(),
            vec!["London", "ada@example.com", "github.com/ada"]
        );
    }
}
