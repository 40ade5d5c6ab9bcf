use crate::Document;
use serde::{Deserialize, Serialize};

/// Page-level metadata harvested alongside the content blocks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub site_name: Option<String>,
}

impl Document {
    /// Extract title with priority fallback:
    /// 1. JSON-LD `headline`
    /// 2. Open Graph `og:title`
    /// 3. Twitter `twitter:title`
    /// 4. `<title>` element
    /// 5. First `<h1>` element
    pub fn extract_title(&self) -> Option<String> {
        if let Some(json_ld) = self.extract_json_ld()
            && let Some(headline) = json_ld.get("headline")
            && let Some(value) = headline.as_str()
        {
            return Some(value.trim().to_string());
        }

        if let Some(title) = self.get_meta_content("og:title") {
            return Some(title);
        }

        if let Some(title) = self.get_meta_content("twitter:title") {
            return Some(title);
        }

        if let Some(title) = self.title() {
            return Some(title);
        }

        self.first_text("h1")
    }

    /// Extract author with priority fallback:
    /// 1. JSON-LD `author` (string, object or array)
    /// 2. Meta `author`
    /// 3. `[rel="author"]` link text
    /// 4. `[itemprop="author"]` text
    pub fn extract_author(&self) -> Option<String> {
        if let Some(json_ld) = self.extract_json_ld()
            && let Some(author) = json_ld.get("author")
            && let Some(name) = Self::extract_author_from_json_ld(author)
        {
            return Some(name);
        }

        if let Some(author) = self.get_meta_content("author") {
            return Some(author);
        }

        self.first_text("[rel=\"author\"]")
            .or_else(|| self.first_text("[itemprop=\"author\"]"))
            .filter(|text| text.chars().count() < 100)
    }

    /// Extract publish date with priority fallback:
    /// 1. JSON-LD `datePublished`
    /// 2. Meta `article:published_time`
    /// 3. `<time datetime="">` element
    /// 4. Meta `date`
    pub fn extract_date(&self) -> Option<String> {
        if let Some(json_ld) = self.extract_json_ld()
            && let Some(date) = json_ld.get("datePublished")
            && let Some(value) = date.as_str()
        {
            return Some(value.to_string());
        }

        if let Some(date) = self.get_meta_content("article:published_time") {
            return Some(date);
        }

        if let Ok(elements) = self.select("time[datetime]")
            && let Some(first) = elements.first()
            && let Some(datetime) = first.attr("datetime")
        {
            return Some(datetime.to_string());
        }

        self.get_meta_content("date")
    }

    /// Extract description with priority fallback:
    /// 1. JSON-LD `description`
    /// 2. Open Graph `og:description`
    /// 3. Meta `description`
    pub fn extract_description(&self) -> Option<String> {
        if let Some(json_ld) = self.extract_json_ld()
            && let Some(desc) = json_ld.get("description")
            && let Some(value) = desc.as_str()
        {
            return Some(value.trim().to_string());
        }

        self.get_meta_content("og:description")
            .or_else(|| self.get_meta_content("description"))
    }

    /// Extract site name with priority fallback:
    /// 1. JSON-LD `publisher.name`
    /// 2. Open Graph `og:site_name`
    /// 3. Host of the base URL
    pub fn extract_site_name(&self) -> Option<String> {
        if let Some(json_ld) = self.extract_json_ld()
            && let Some(publisher) = json_ld.get("publisher")
            && let Some(name) = publisher.get("name")
            && let Some(value) = name.as_str()
        {
            return Some(value.to_string());
        }

        if let Some(site) = self.get_meta_content("og:site_name") {
            return Some(site);
        }

        self.base_url()
            .and_then(|url| url.host_str())
            .map(|host| host.trim_start_matches("www.").to_string())
    }

    /// Extract all metadata at once
    pub fn extract_metadata(&self) -> Metadata {
        Metadata {
            title: self.extract_title(),
            author: self.extract_author(),
            date: self.extract_date(),
            description: self.extract_description(),
            site_name: self.extract_site_name(),
        }
    }

    /// Get meta tag content by name or property attribute
    fn get_meta_content(&self, attr: &str) -> Option<String> {
        for key in ["name", "property"] {
            let selector = format!("meta[{}=\"{}\"]", key, attr);
            if let Ok(elements) = self.select(&selector)
                && let Some(el) = elements.first()
                && let Some(content) = el.attr("content")
            {
                let content = content.trim();
                if !content.is_empty() {
                    return Some(content.to_string());
                }
            }
        }

        None
    }

    fn first_text(&self, selector: &str) -> Option<String> {
        let elements = self.select(selector).ok()?;
        let text = elements.first()?.text();
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() { None } else { Some(text) }
    }

    /// Extract and parse the first well-formed JSON-LD object.
    /// Top-level arrays and `@graph` wrappers yield their first object.
    fn extract_json_ld(&self) -> Option<serde_json::Value> {
        let elements = self.select("script[type=\"application/ld+json\"]").ok()?;
        for el in elements.iter() {
            let text = el.text();
            let Ok(value) = serde_json::from_str::<serde_json::Value>(text.trim()) else {
                continue;
            };

            let value = match value {
                serde_json::Value::Array(items) => items.into_iter().find(|v| v.is_object()),
                v if v.get("@graph").is_some() => v
                    .get("@graph")
                    .and_then(|g| g.as_array())
                    .and_then(|items| items.iter().find(|i| i.get("headline").is_some()).cloned()),
                v => Some(v),
            };

            if value.is_some() {
                return value;
            }
        }
        None
    }

    /// Extract author name from JSON-LD author field
    /// Handles both string and object formats
    fn extract_author_from_json_ld(author: &serde_json::Value) -> Option<String> {
        if let Some(name) = author.as_str() {
            return Some(name.to_string());
        }

        if let Some(obj) = author.as_object()
            && let Some(name) = obj.get("name")
            && let Some(name_str) = name.as_str()
        {
            return Some(name_str.to_string());
        }

        if let Some(arr) = author.as_array()
            && let Some(first) = arr.first()
        {
            return Self::extract_author_from_json_ld(first);
        }

        None
    }
}
