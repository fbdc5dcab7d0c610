use regex::Regex;
use scraper::Html;

pub struct Extractor {
    email_regex: Regex,
}

impl Extractor {
    pub fn new() -> Self {
        Extractor {
            email_regex: Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").unwrap(),
        }
    }

    // Scans every text node of the document in order of appearance. Markup
    // tags and attribute values are never searched, only visible text.
    // Matches are returned as-is: no lowercasing, no deduplication.
    pub fn extract(&self, content: &str) -> Vec<String> {
        let document = Html::parse_document(content);
        let mut emails = Vec::new();
        for text in document.root_element().text() {
            for m in self.email_regex.find_iter(text) {
                emails.push(m.as_str().to_string());
            }
        }
        emails
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Extractor::new()
    }
}
