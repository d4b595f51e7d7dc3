//! HTMLテーブルの抽出
//!
//! ドメイン知識は持たない。テーブルを安定した属性で探し、行をセル文字列の列として返す。

use scraper::{ElementRef, Html, Node, Selector};

use crate::error::ScraperError;

/// トリム済みセル文字列の行
pub type TableRow = Vec<String>;

/// テーブルの識別子（id または class）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    Id(&'static str),
    Class(&'static str),
}

impl Locator {
    // `8^1580` のような id も通るよう属性セレクタで組み立てる
    fn css(&self) -> String {
        match self {
            Self::Id(id) => format!("table[id=\"{id}\"]"),
            Self::Class(class) => format!("table[class~=\"{class}\"]"),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
        }
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css)
        .map_err(|e| ScraperError::Scraping(format!("invalid CSS selector '{css}': {e}")))
}

/// パース済みページ
pub struct HtmlPage {
    document: Html,
}

impl HtmlPage {
    pub fn parse(markup: &str) -> Self {
        Self {
            document: Html::parse_document(markup),
        }
    }

    fn find_table(&self, locator: &Locator) -> Result<Option<ElementRef<'_>>, ScraperError> {
        let sel = selector(&locator.css())?;
        Ok(self.document.select(&sel).next())
    }

    pub fn has_table(&self, locator: &Locator) -> Result<bool, ScraperError> {
        Ok(self.find_table(locator)?.is_some())
    }

    /// 空セルを除いた行の列。列位置は固定ではない。
    pub fn table(&self, locator: &Locator) -> Result<Vec<TableRow>, ScraperError> {
        Ok(self
            .dense_table(locator)?
            .into_iter()
            .map(|row| row.into_iter().filter(|cell| !cell.is_empty()).collect())
            .collect())
    }

    /// 空セルも残した行の列（列位置が意味を持つテーブル用）
    pub fn dense_table(&self, locator: &Locator) -> Result<Vec<TableRow>, ScraperError> {
        let table = self
            .find_table(locator)?
            .ok_or_else(|| ScraperError::TableNotFound(locator.to_string()))?;
        let tr = selector("tr")?;
        let td = selector("td")?;

        Ok(table
            .select(&tr)
            .map(|row| {
                row.select(&td)
                    .map(|cell| cell_text(cell).trim().to_string())
                    .collect()
            })
            .collect())
    }

    /// テーブル内のテキストノードを行単位で（トリム済み・空行なし）
    pub fn table_lines(&self, locator: &Locator) -> Result<Vec<String>, ScraperError> {
        let table = self
            .find_table(locator)?
            .ok_or_else(|| ScraperError::TableNotFound(locator.to_string()))?;

        Ok(table
            .text()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub fn text_by_id(&self, id: &str) -> Result<Option<String>, ScraperError> {
        let sel = selector(&format!("[id=\"{id}\"]"))?;
        Ok(self
            .document
            .select(&sel)
            .next()
            .map(|el| el.text().collect::<String>()))
    }

    /// 文書中のいずれかのテキストノードが `needle` を含むか（大文字小文字を区別）
    pub fn contains_text(&self, needle: &str) -> bool {
        self.document
            .root_element()
            .text()
            .any(|text| text.contains(needle))
    }

    pub fn input_value(&self, id: &str) -> Result<Option<String>, ScraperError> {
        let sel = selector(&format!("input[id=\"{id}\"]"))?;
        Ok(self
            .document
            .select(&sel)
            .next()
            .and_then(|input| input.value().attr("value"))
            .map(str::to_string))
    }
}

/// テキストノードを連結したセル文字列。`<br>` は改行として扱う。
fn cell_text(cell: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in cell.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}

/// `markup` 中の最初の該当テーブルを行に分解する
pub fn parse_table(markup: &str, locator: &Locator) -> Result<Vec<TableRow>, ScraperError> {
    HtmlPage::parse(markup).table(locator)
}
