use serde::{Deserialize, Serialize};

/// A catalog entry. `available_copies` and `is_available` are derived by the
/// backend from the stock records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    #[serde(default)]
    pub isbn: Option<String>,
    pub title: String,
    #[serde(default)]
    pub image_couverture: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub available_copies: u32,
    #[serde(default)]
    pub stocks: Vec<BookStock>,
    #[serde(default)]
    pub is_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub books_count: u32,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub death_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub books_count: u32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Per-language stock record for a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookStock {
    pub id: String,
    #[serde(default)]
    pub book_title: Option<String>,
    #[serde(default)]
    pub book_isbn: Option<String>,
    pub language: String,
    pub total_quantity: u32,
    pub available_quantity: u32,
    #[serde(default)]
    pub condition_note: Option<String>,
    /// Id of the owning book.
    pub book: String,
}

/// Write payload for creating or updating a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookForm {
    pub title: String,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub publication_year: Option<i32>,
    /// Ids of existing authors.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Id of an existing category.
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book_detail() {
        let json = r#"{
            "id": "b1",
            "isbn": "978-2-1234-5680-3",
            "title": "Le Petit Prince",
            "image_couverture": null,
            "summary": "Un aviateur rencontre un petit prince.",
            "publisher": "Gallimard",
            "publication_year": 1943,
            "authors": [{"id": "a1", "full_name": "Antoine de Saint-Exupery", "books_count": 4}],
            "category": {"id": "c1", "name": "Fiction", "books_count": 12},
            "available_copies": 3,
            "stocks": [{
                "id": "s1", "book_title": "Le Petit Prince", "book_isbn": null,
                "language": "fr", "total_quantity": 5, "available_quantity": 3,
                "condition_note": "bon etat", "book": "b1"
            }],
            "is_available": true
        }"#;
        let book: Book = serde_json::from_str(json).expect("book should parse");
        assert_eq!(book.authors.len(), 1);
        assert_eq!(book.stocks[0].available_quantity, 3);
        assert!(book.is_available);
    }

    #[test]
    fn test_parse_book_list_entry_without_stocks() {
        let json = r#"{"id": "b2", "title": "Candide", "authors": [], "available_copies": 0, "is_available": false}"#;
        let book: Book = serde_json::from_str(json).expect("list entry should parse");
        assert!(book.stocks.is_empty());
        assert!(!book.is_available);
    }
}
