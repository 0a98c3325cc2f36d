//! Pure text formatting: sizes, dates, citations, links and assistant message bodies.

use crate::models::{DocumentSummary, ReferatResponse, SearchHit, Source, SummaryResponse, WebSearchResponse};
use chrono::{DateTime, Local, NaiveDateTime};
use unicode_segmentation::UnicodeSegmentation;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const DATE_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";
pub const REFERAT_PREVIEW_LEN: usize = 500;
const SNIPPET_LEN: usize = 200;

/// Human-readable size: the largest unit not exceeding the value, two decimals at most.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut threshold: u64 = 1024;
    while unit < SIZE_UNITS.len() - 1 && bytes >= threshold {
        unit += 1;
        threshold = threshold.saturating_mul(1024);
    }

    let value = bytes as f64 / 1024f64.powi(unit as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// Upload timestamp in `ru-RU` shape. Offset-less timestamps are local time.
pub fn format_upload_date(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(DATE_FORMAT).to_string();
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
        .map(|naive| naive.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

/// Percentage with one decimal; halves round away from zero.
pub fn format_similarity(similarity: f64) -> String {
    let tenths = (similarity * 1000.0).round() / 10.0;
    format!("{:.1}%", tenths)
}

/// `<rank>. <filename> (совпадение: <pct>%)`, rank starting at 1.
pub fn format_source_line(rank: usize, source: &Source) -> String {
    format!(
        "{}. {} (совпадение: {})",
        rank,
        source.filename,
        format_similarity(source.similarity)
    )
}

pub fn format_chunk_count(count: u64) -> String {
    format!("{} фрагментов", count)
}

/// Download link for a generated PDF.
///
/// Absolute URLs pass through. Server paths are encoded segment by segment and
/// prefixed with `origin`, so a `/` inside the path is never escaped.
pub fn build_pdf_url(pdf_url: &str, origin: &str) -> String {
    if pdf_url.starts_with("http") {
        return pdf_url.to_string();
    }

    let encoded: Vec<String> = pdf_url
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();

    format!("{}/{}", origin.trim_end_matches('/'), encoded.join("/"))
}

pub fn summary_message(result: &SummaryResponse) -> String {
    format!(
        "## 📄 Краткое содержание документа\n\n**Документ:** {}\n**Фрагментов:** {}\n\n---\n\n{}",
        result.filename, result.chunk_count, result.summary
    )
}

/// First 500 characters of the referat, always followed by an ellipsis.
pub fn referat_preview(text: &str) -> String {
    let head: String = text.graphemes(true).take(REFERAT_PREVIEW_LEN).collect();
    format!("{head}...")
}

pub fn referat_message(result: &ReferatResponse, pdf_link: &str) -> String {
    format!(
        "## 📚 Реферативный перевод документа\n\n**Документ:** {}\n**Фрагментов:** {}\n\n\
         ✅ **Реферативный перевод успешно создан!**\n\n📥 [**Скачать PDF**]({})\n\n---\n\n\
         ### Предпросмотр:\n\n{}\n\n*[Полный текст доступен в PDF файле]*",
        result.filename,
        result.chunk_count,
        pdf_link,
        referat_preview(&result.referat)
    )
}

pub fn document_details_message(doc: &DocumentSummary) -> String {
    let mut message = format!(
        "## 📄 {}\n\n**Размер:** {}\n**Фрагментов:** {}\n**Загружен:** {}",
        doc.filename,
        format_file_size(doc.file_size),
        doc.chunk_count,
        format_upload_date(&doc.upload_date)
    );

    if !doc.metadata.is_empty() {
        let mut keys: Vec<&String> = doc.metadata.keys().collect();
        keys.sort();
        message.push_str("\n\n**Метаданные:**");
        for key in keys {
            let value = &doc.metadata[key];
            let rendered = value
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string());
            message.push_str(&format!("\n- {}: {}", key, rendered));
        }
    }

    message
}

fn snippet(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.graphemes(true).count() > SNIPPET_LEN {
        let head: String = flat.graphemes(true).take(SNIPPET_LEN).collect();
        format!("{head}...")
    } else {
        flat
    }
}

pub fn search_results_message(query: &str, hits: &[SearchHit]) -> String {
    let mut message = format!("## 🔍 Результаты поиска: {}\n", query);
    if hits.is_empty() {
        message.push_str(&format!("\n{}", crate::strings::NO_SEARCH_RESULTS));
        return message;
    }

    for (idx, hit) in hits.iter().enumerate() {
        message.push_str(&format!(
            "\n{}. **{}** (совпадение: {})\n   {}\n",
            idx + 1,
            hit.filename,
            format_similarity(hit.similarity),
            snippet(&hit.content)
        ));
    }
    message
}

pub fn web_search_message(result: &WebSearchResponse) -> String {
    let mut message = result.summary.clone();
    if !result.results.is_empty() {
        message.push_str(&format!(
            "\n\n---\n\n**Источники ({}):**\n",
            result.sources_count.max(result.results.len())
        ));
        for (idx, item) in result.results.iter().enumerate() {
            message.push_str(&format!("\n{}. [{}]({})", idx + 1, item.title, item.url));
        }
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WebSearchResult;

    #[test]
    fn file_size_picks_largest_unit() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn file_size_stops_at_gigabytes() {
        assert_eq!(format_file_size(2 * 1024u64.pow(4)), "2048 GB");
    }

    #[test]
    fn upload_date_uses_russian_layout() {
        assert_eq!(
            format_upload_date("2024-01-15T10:30:00.123456"),
            "15.01.2024, 10:30:00"
        );
        assert_eq!(format_upload_date("2024-03-01 08:05:09"), "01.03.2024, 08:05:09");
        assert_eq!(format_upload_date("вчера"), "Invalid Date");
    }

    #[test]
    fn source_line_shows_one_decimal_percentage() {
        let source = Source {
            filename: "report.pdf".to_string(),
            similarity: 0.8734,
            document_id: None,
            chunk_index: None,
        };
        assert_eq!(format_source_line(1, &source), "1. report.pdf (совпадение: 87.3%)");
        assert_eq!(format_similarity(0.8125), "81.3%");
        assert_eq!(format_similarity(0.5625), "56.3%");
        assert_eq!(format_similarity(0.0625), "6.3%");
        assert_eq!(format_similarity(0.75), "75.0%");
    }

    #[test]
    fn pdf_url_encodes_each_segment() {
        assert_eq!(
            build_pdf_url("/files/my report (final).pdf", "http://localhost:8000"),
            "http://localhost:8000/files/my%20report%20%28final%29.pdf"
        );
        assert_eq!(
            build_pdf_url("referats//отчёт.pdf", "http://localhost:8000/"),
            "http://localhost:8000/referats/%D0%BE%D1%82%D1%87%D1%91%D1%82.pdf"
        );
    }

    #[test]
    fn absolute_pdf_url_passes_through() {
        let url = "https://cdn.example.com/a b.pdf";
        assert_eq!(build_pdf_url(url, "http://localhost:8000"), url);
    }

    #[test]
    fn referat_preview_is_truncated() {
        let long = "я".repeat(600);
        let preview = referat_preview(&long);
        assert_eq!(preview.chars().count(), 503);
        assert!(preview.ends_with("..."));
        assert_eq!(referat_preview("коротко"), "коротко...");
    }

    #[test]
    fn summary_message_has_header_and_body() {
        let message = summary_message(&SummaryResponse {
            summary: "Тело".to_string(),
            filename: "a.pdf".to_string(),
            chunk_count: 4,
        });
        assert!(message.starts_with("## 📄 Краткое содержание документа"));
        assert!(message.contains("**Документ:** a.pdf\n**Фрагментов:** 4"));
        assert!(message.ends_with("---\n\nТело"));
    }

    #[test]
    fn referat_message_embeds_link_and_preview() {
        let message = referat_message(
            &ReferatResponse {
                referat: "x".repeat(700),
                pdf_url: "/referats/a.pdf".to_string(),
                filename: "a.pdf".to_string(),
                chunk_count: 2,
            },
            "http://h/referats/a.pdf",
        );
        assert!(message.contains("[**Скачать PDF**](http://h/referats/a.pdf)"));
        assert!(message.contains(&format!("{}...", "x".repeat(500))));
        assert!(!message.contains(&"x".repeat(501)));
        assert!(message.ends_with("*[Полный текст доступен в PDF файле]*"));
    }

    #[test]
    fn search_message_lists_ranked_hits() {
        let hits = vec![SearchHit {
            filename: "a.pdf".to_string(),
            similarity: 0.5,
            content: "line one\n\nline two".to_string(),
            chunk_index: Some(0),
            document_id: Some(1),
        }];
        let message = search_results_message("q", &hits);
        assert!(message.contains("1. **a.pdf** (совпадение: 50.0%)\n   line one line two"));
        assert!(search_results_message("q", &[]).ends_with("Ничего не найдено."));
    }

    #[test]
    fn web_message_appends_sources() {
        let message = web_search_message(&WebSearchResponse {
            query: "rust".to_string(),
            summary: "Итог".to_string(),
            results: vec![WebSearchResult {
                title: "Rust".to_string(),
                url: "https://rust-lang.org".to_string(),
                snippet: String::new(),
            }],
            sources_count: 1,
        });
        assert!(message.starts_with("Итог"));
        assert!(message.ends_with("1. [Rust](https://rust-lang.org)"));
    }
}
