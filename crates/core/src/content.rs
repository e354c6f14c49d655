//! Portfolio content: persona profile, conversation script, articles,
//! skills and work history.
//!
//! Content is data, not code. A default document is compiled in and can be
//! replaced by a file named in `[content] path`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::config::ContentConfig;
use crate::error::{ContentError, Result};
use crate::script::Script;

const BUILTIN_CONTENT: &str = include_str!("../content/portfolio.toml");

/// Who the conversation is with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Persona {
    pub name: String,
    /// Avatar fallback letter
    pub initial: String,
    pub title: String,
    pub status: String,
    /// Label of the (inert) input field
    pub contact: String,
}

impl Persona {
    /// "Frontend Developer • Available"
    pub fn subtitle(&self) -> String {
        format!("{} • {}", self.title, self.status)
    }
}

/// Where selecting an article leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleLink<'a> {
    /// Rendered in place; `None` when the article has no body yet
    Internal(Option<&'a str>),
    /// Opens outside the app
    External(&'a str),
}

/// An entry in the projects panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Article {
    pub fn link(&self) -> ArticleLink<'_> {
        match &self.url {
            Some(url) => ArticleLink::External(url),
            None => ArticleLink::Internal(self.body.as_deref().map(str::trim).filter(|b| !b.is_empty())),
        }
    }

    pub fn is_external(&self) -> bool {
        self.url.is_some()
    }
}

/// A titled group of skill chips
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillGroup {
    pub name: String,
    pub skills: Vec<String>,
}

/// One work-history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Role {
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub period: Option<String>,
    pub summary: String,
}

/// Everything the session displays
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Portfolio {
    pub persona: Persona,
    pub script: Script,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub experience: Vec<Role>,
}

impl Portfolio {
    /// The compiled-in content
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CONTENT)
    }

    /// Parse and validate a content document
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let portfolio: Portfolio = toml::from_str(toml_str).map_err(ContentError::from)?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// Load from a content file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ContentError::NotFound(path.to_path_buf()).into());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load whatever the config points at
    pub fn load(config: &ContentConfig) -> Result<Self> {
        match &config.path {
            Some(path) => {
                tracing::info!(path = %crate::logging::sanitize_path(path), "loading portfolio content");
                Self::from_file(path)
            }
            None => Self::builtin(),
        }
    }

    pub fn article(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    fn validate(&self) -> std::result::Result<(), ContentError> {
        let mut seen = HashSet::new();
        for article in &self.articles {
            if !seen.insert(article.id.as_str()) {
                return Err(ContentError::DuplicateArticle(article.id.clone()));
            }
            if article.title.trim().is_empty() {
                return Err(ContentError::EmptyTitle(article.id.clone()));
            }
            if article.url.is_some() && article.body.is_some() {
                return Err(ContentError::AmbiguousLink(article.id.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Speaker;

    const MINIMAL: &str = r#"
[persona]
name = "Ada"
initial = "A"
title = "Engineer"
status = "Busy"
contact = "Email Ada"

[[script]]
speaker = "persona"
kind = "text"
text = "hello"
delay_ms = 100
"#;

    #[test]
    fn test_builtin_content() {
        let portfolio = Portfolio::builtin().unwrap();
        assert_eq!(portfolio.persona.name, "Carl Mensah");
        assert_eq!(portfolio.persona.subtitle(), "Frontend Developer • Available");
        assert_eq!(portfolio.script.len(), 9);
        assert_eq!(portfolio.script.get(2).unwrap().speaker, Speaker::Visitor);
        assert!(portfolio.script.get(4).unwrap().skill_tags().is_some());
        assert_eq!(portfolio.articles.len(), 4);
        assert_eq!(portfolio.skills.len(), 2);
        assert_eq!(portfolio.skills[1].skills.len(), 4);
        assert_eq!(portfolio.experience.len(), 1);
    }

    #[test]
    fn test_builtin_script_delays() {
        let portfolio = Portfolio::builtin().unwrap();
        let delays: Vec<u64> = portfolio.script.iter().map(|e| e.delay_ms).collect();
        assert_eq!(delays, vec![1000, 1500, 2000, 1000, 1800, 1700, 1500, 2000, 2400]);
    }

    #[test]
    fn test_article_links() {
        let portfolio = Portfolio::builtin().unwrap();

        let article = portfolio.article("universal-components").unwrap();
        assert!(matches!(article.link(), ArticleLink::Internal(Some(body)) if body.starts_with("The illusion")));

        let article = portfolio.article("maintainable-code").unwrap();
        assert_eq!(article.link(), ArticleLink::Internal(None));

        let article = portfolio.article("codepen-tetris").unwrap();
        assert!(article.is_external());
        assert_eq!(article.link(), ArticleLink::External("https://codepen.io/carl-j-m/pen/VYZxpWW"));

        assert!(portfolio.article("missing").is_none());
    }

    #[test]
    fn test_minimal_content() {
        let portfolio = Portfolio::from_toml_str(MINIMAL).unwrap();
        assert_eq!(portfolio.persona.initial, "A");
        assert!(portfolio.articles.is_empty());
        assert!(portfolio.skills.is_empty());
        assert!(portfolio.experience.is_empty());
    }

    #[test]
    fn test_duplicate_article_rejected() {
        let doc = format!(
            "{MINIMAL}\n[[articles]]\nid = \"a\"\ntitle = \"One\"\ndescription = \"\"\ndate = \"\"\n\n[[articles]]\nid = \"a\"\ntitle = \"Two\"\ndescription = \"\"\ndate = \"\"\n"
        );
        let err = Portfolio::from_toml_str(&doc).unwrap_err();
        assert!(err.to_string().contains("duplicate article id: a"));
    }

    #[test]
    fn test_ambiguous_link_rejected() {
        let doc = format!(
            "{MINIMAL}\n[[articles]]\nid = \"a\"\ntitle = \"One\"\ndescription = \"\"\ndate = \"\"\nbody = \"x\"\nurl = \"https://example.com\"\n"
        );
        let err = Portfolio::from_toml_str(&doc).unwrap_err();
        assert!(err.to_string().contains("both a body and a url"));
    }

    #[test]
    fn test_empty_script_rejected() {
        let persona = MINIMAL.split("[[script]]").next().unwrap();
        let doc = format!("script = []\n{persona}");
        let err = Portfolio::from_toml_str(&doc).unwrap_err();
        assert!(err.to_string().contains("script has no entries"), "{err}");
    }

    #[test]
    fn test_from_file_missing() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = Portfolio::from_file(&temp.path().join("portfolio.toml")).unwrap_err();
        assert!(err.to_string().contains("content file does not exist"));
    }

    #[test]
    fn test_load_from_config_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("portfolio.toml");
        std::fs::write(&path, MINIMAL).unwrap();

        let portfolio = Portfolio::load(&ContentConfig { path: Some(path) }).unwrap();
        assert_eq!(portfolio.persona.name, "Ada");

        let portfolio = Portfolio::load(&ContentConfig::default()).unwrap();
        assert_eq!(portfolio.persona.name, "Carl Mensah");
    }
}
