//! Builder for test records with sensible defaults.

use chrono::{Days, Local, NaiveDate};
use classnotes::domain::{NoteRecord, RecordId, Semester};

/// Builder for catalog records used to seed a test store.
///
/// Defaults to semester 2, category `Organic`, uploaded thirty days ago (so
/// no "new" badge) with a Drive file link.
#[derive(Debug)]
pub struct TestRecord {
    id: RecordId,
    title: String,
    semester: u32,
    category: String,
    description: String,
    author: String,
    uploaded: NaiveDate,
    file_url: Option<String>,
}

impl TestRecord {
    pub fn new(title: impl Into<String>) -> Self {
        let id = RecordId::generate();
        Self {
            file_url: Some(format!("https://drive.google.com/file/d/{}/view", id)),
            id,
            title: title.into(),
            semester: 2,
            category: "Organic".to_string(),
            description: String::new(),
            author: String::new(),
            uploaded: days_ago(30),
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = id.parse().expect("Invalid RecordId");
        self
    }

    pub fn semester(mut self, semester: u32) -> Self {
        self.semester = semester;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Sets the upload date to `days` days before today.
    pub fn uploaded_days_ago(mut self, days: u64) -> Self {
        self.uploaded = days_ago(days);
        self
    }

    pub fn without_file(mut self) -> Self {
        self.file_url = None;
        self
    }

    pub fn record_id(&self) -> &RecordId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn to_record(&self) -> NoteRecord {
        let semester = Semester::new(self.semester).expect("Invalid semester");
        let mut builder = NoteRecord::builder(self.id.clone(), &self.title, semester, self.uploaded)
            .category(&self.category)
            .description(&self.description)
            .author(&self.author);
        if let Some(url) = &self.file_url {
            builder = builder.file_url(url);
        }
        builder.build()
    }
}

fn days_ago(days: u64) -> NaiveDate {
    Local::now()
        .date_naive()
        .checked_sub_days(Days::new(days))
        .expect("date in range")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults() {
        let record = TestRecord::new("Alkenes").to_record();
        assert_eq!(record.title(), "Alkenes");
        assert_eq!(record.semester().get(), 2);
        assert_eq!(record.category(), "Organic");
        assert!(!record.is_new(Local::now().date_naive()));
        assert!(record.file_url().is_some());
    }

    #[test]
    fn test_record_builder_fluent() {
        let record = TestRecord::new("Gas Laws")
            .id("gas")
            .semester(1)
            .category("Physical")
            .author("R. Sen")
            .uploaded_days_ago(1)
            .without_file()
            .to_record();

        assert_eq!(record.id().as_str(), "gas");
        assert_eq!(record.category(), "Physical");
        assert_eq!(record.author(), "R. Sen");
        assert!(record.is_new(Local::now().date_naive()));
        assert!(record.file_url().is_none());
    }
}
