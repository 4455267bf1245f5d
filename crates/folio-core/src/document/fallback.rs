//! Compiled-in portfolio content shown when no backend is configured.

use super::model::{PortfolioDocument, Project, ProjectId, Sections};
use serde_json::Map;

fn project(id: i64, title: &str, description: &str, tags: &[&str]) -> Project {
    Project {
        id: ProjectId::Number(id),
        title: title.to_string(),
        description: description.to_string(),
        image: String::new(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        extra: Map::new(),
    }
}

/// Builds the fallback document.
pub fn fallback_document() -> PortfolioDocument {
    PortfolioDocument {
        name: "Anshuman Singh".to_string(),
        title: "Python Backend Developer & Aspiring Software Engineer".to_string(),
        profile_image: Some("assets/profile-placeholder.jpg".to_string()),
        sections: Sections::default(),
        projects: vec![
            project(
                1,
                "Telegram JSON DB Manager",
                "A Flask-based Telegram bot that manages a JSON database, allowing users to store and retrieve data via Telegram commands.",
                &["Flask", "Telegram Bot", "JSON"],
            ),
            project(
                2,
                "E-commerce Store",
                "A full-fledged e-commerce platform built with Flask and SQLite, hosted on Render. Features include product listings, cart, and user authentication.",
                &["Flask", "SQLite", "Render"],
            ),
            project(
                3,
                "AI-powered Exam Result Bot",
                "A bot that scrapes university websites and uses AI to detect result updates, then notifies students via Telegram.",
                &["Python", "Web Scraping", "AI", "Telegram"],
            ),
            project(
                4,
                "Dream & Soul Journal",
                "An audio-guided journaling tool that helps users reflect on their dreams and daily experiences with calming background sounds.",
                &["Flask", "Audio Processing", "Journaling"],
            ),
        ],
        extra: Map::new(),
    }
}
