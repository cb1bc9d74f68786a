//! Flattening of EFetch XML into [`ArticleRecord`]s
//!
//! Every `PubmedArticle` element anywhere in the document produces one record.
//! Fields the article does not carry are left as `None`; nothing in here fails
//! on incomplete articles.

use crate::error::Result;
use crate::pubmed::models::ArticleRecord;
use crate::pubmed::xml::{XmlElement, parse_document};
use tracing::{debug, instrument};

/// Date-bearing elements, in order of preference
const DATE_LOCATIONS: [&str; 4] = ["PubDate", "ArticleDate", "DateCompleted", "DateRevised"];

/// Parse an EFetch XML response and extract all articles
pub fn parse_articles_from_xml(xml: &str) -> Result<Vec<ArticleRecord>> {
    let root = parse_document(xml)?;
    Ok(extract_records(&root))
}

/// Extract one record per `PubmedArticle` element, in document order
#[instrument(skip(root), fields(root_element = %root.name))]
pub fn extract_records(root: &XmlElement) -> Vec<ArticleRecord> {
    let records: Vec<ArticleRecord> = root
        .select_all(&["PubmedArticle"])
        .into_iter()
        .map(extract_record)
        .collect();

    debug!(articles = records.len(), "Extracted article records");
    records
}

/// Flatten a single `PubmedArticle` element
pub fn extract_record(article: &XmlElement) -> ArticleRecord {
    let pmid = first_text(article, &["PMID"]);
    let pubmed_url = ArticleRecord::url_for(pmid.as_deref());

    ArticleRecord {
        title: first_text(article, &["ArticleTitle"]),
        authors: Some(extract_authors(article)),
        journal: first_text(article, &["Journal", "Title"])
            .or_else(|| first_text(article, &["MedlineJournalInfo", "MedlineTA"])),
        publication_date: extract_date(article),
        volume: first_text(article, &["JournalIssue", "Volume"]),
        issue: first_text(article, &["JournalIssue", "Issue"]),
        pages: first_text(article, &["Pagination", "MedlinePgn"]),
        abstract_text: Some(extract_abstract(article)),
        keywords: Some(extract_keywords(article)),
        doi: extract_doi(article),
        pmid,
        pubmed_url,
    }
}

fn first_text(article: &XmlElement, path: &[&str]) -> Option<String> {
    article.select(path).and_then(XmlElement::trimmed_text)
}

fn child_text(element: &XmlElement, name: &str) -> Option<String> {
    element.child(name).and_then(XmlElement::trimmed_text)
}

/// Author display names joined with `"; "`
///
/// Authors without a last name (collective names, empty entries) are skipped.
fn extract_authors(article: &XmlElement) -> String {
    let Some(author_list) = article.select(&["AuthorList"]) else {
        return String::new();
    };

    author_list
        .children_named("Author")
        .filter_map(|author| {
            format_author_name(
                child_text(author, "ForeName").as_deref(),
                child_text(author, "LastName").as_deref(),
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// `"Fore Last"`, or just the last name; `None` without a last name
pub fn format_author_name(fore_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
    match (fore_name, last_name) {
        (Some(fore), Some(last)) => Some(format!("{} {}", fore, last)),
        (None, Some(last)) => Some(last.to_string()),
        (_, None) => None,
    }
}

/// Publication date from the first date element that carries a year
fn extract_date(article: &XmlElement) -> Option<String> {
    DATE_LOCATIONS.iter().find_map(|&location| {
        let date = article.select(&[location])?;
        let year = child_text(date, "Year")?;
        Some(format_date(
            &year,
            child_text(date, "Month").as_deref(),
            child_text(date, "Day").as_deref(),
        ))
    })
}

/// Assemble `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
///
/// The day is only used together with a month. Month names such as `Mar` are
/// turned into their number; numeric parts are zero-padded to two digits.
pub fn format_date(year: &str, month: Option<&str>, day: Option<&str>) -> String {
    let mut date = year.to_string();
    if let Some(month) = month {
        date.push('-');
        date.push_str(&pad_two(&normalize_month(month)));
        if let Some(day) = day {
            date.push('-');
            date.push_str(&pad_two(day));
        }
    }
    date
}

fn normalize_month(month: &str) -> String {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];

    let lower = month.to_ascii_lowercase();
    if lower.len() >= 3 {
        if let Some(index) = MONTHS.iter().position(|abbrev| lower.starts_with(abbrev)) {
            return format!("{:02}", index + 1);
        }
    }
    month.to_string()
}

fn pad_two(part: &str) -> String {
    format!("{:0>2}", part)
}

/// Abstract sections joined with a space, labelled ones as `"Label: text"`
fn extract_abstract(article: &XmlElement) -> String {
    let Some(abstract_element) = article.select(&["Abstract"]) else {
        return String::new();
    };

    abstract_element
        .select_all(&["AbstractText"])
        .into_iter()
        .filter_map(|section| {
            let text = section.trimmed_text()?;
            Some(match section.attribute("Label") {
                Some(label) if !label.is_empty() => format!("{}: {}", label, text),
                _ => text,
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keywords from every keyword list, joined with `"; "`
fn extract_keywords(article: &XmlElement) -> String {
    article
        .select_all(&["KeywordList", "Keyword"])
        .into_iter()
        .filter_map(XmlElement::trimmed_text)
        .collect::<Vec<_>>()
        .join("; ")
}

fn extract_doi(article: &XmlElement) -> Option<String> {
    article
        .select_all(&["ArticleId"])
        .into_iter()
        .find(|id| id.attribute("IdType") == Some("doi"))
        .and_then(XmlElement::trimmed_text)
}
