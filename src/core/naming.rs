//! Output file naming.

use serde::{Deserialize, Serialize};

/// Components of a PLE book file name.
///
/// `LE<taxpayer><year><month><day><book><oportunity><ops><info>11.<ext>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookName {
    /// Taxpayer id (RUC), 11 digits.
    pub taxpayer_id: String,
    /// Period year, 4 digits.
    pub year: String,
    /// Period month, `00` for annual books.
    pub month: String,
    /// Period day, `00` except for inventories and balances.
    pub day: String,
    /// Book code, 6 digits.
    pub book_id: String,
    /// Oportunity code, `00` except for inventories and balances.
    pub oportunity: String,
    /// Operations flag: `0` entity closure, `1` operative, `2` book closure.
    pub ops_flag: String,
    /// Whether the book carries information.
    pub info: bool,
    /// File extension without the dot.
    pub extension: String,
}

impl BookName {
    /// Character offset of the info digit for an 11-digit taxpayer id and
    /// a 6-digit book code.
    pub const INFO_FLAG_OFFSET: usize = 30;

    /// The compiled file name.
    pub fn compile(&self) -> String {
        format!(
            "LE{}{}{}{}{}{}{}{}11.{}",
            self.taxpayer_id,
            self.year,
            self.month,
            self.day,
            self.book_id,
            self.oportunity,
            self.ops_flag,
            if self.info { "1" } else { "0" },
            self.extension,
        )
    }
}

impl Default for BookName {
    fn default() -> Self {
        Self {
            taxpayer_id: String::new(),
            year: String::new(),
            month: "00".into(),
            day: "00".into(),
            book_id: String::new(),
            oportunity: "00".into(),
            ops_flag: "1".into(),
            info: false,
            extension: "txt".into(),
        }
    }
}

/// Builder for [`BookName`].
///
/// # Example
///
/// ```
/// use librosple::core::BookNameBuilder;
///
/// let name = BookNameBuilder::new("20100066603", "2023", "070100")
///     .ops_flag("1")
///     .info(true)
///     .extension("TXT")
///     .build();
/// assert_eq!(name, "LE2010006660320230000070100001111.TXT");
/// ```
pub struct BookNameBuilder {
    name: BookName,
}

impl BookNameBuilder {
    /// Start with the required taxpayer id, year and book code.
    pub fn new(
        taxpayer_id: impl Into<String>,
        year: impl Into<String>,
        book_id: impl Into<String>,
    ) -> Self {
        Self {
            name: BookName {
                taxpayer_id: taxpayer_id.into(),
                year: year.into(),
                book_id: book_id.into(),
                ..Default::default()
            },
        }
    }

    /// Set the period month.
    pub fn month(mut self, month: impl Into<String>) -> Self {
        self.name.month = month.into();
        self
    }

    /// Set the period day.
    pub fn day(mut self, day: impl Into<String>) -> Self {
        self.name.day = day.into();
        self
    }

    /// Set the oportunity code.
    pub fn oportunity(mut self, oportunity: impl Into<String>) -> Self {
        self.name.oportunity = oportunity.into();
        self
    }

    /// Set the operations flag.
    pub fn ops_flag(mut self, ops_flag: impl Into<String>) -> Self {
        self.name.ops_flag = ops_flag.into();
        self
    }

    /// Set the information flag.
    pub fn info(mut self, info: bool) -> Self {
        self.name.info = info;
        self
    }

    /// Set the extension (without the dot).
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.name.extension = extension.into();
        self
    }

    /// The name components.
    pub fn into_parts(self) -> BookName {
        self.name
    }

    /// Compile the file name.
    pub fn build(self) -> String {
        self.name.compile()
    }
}

/// File name of a PDT 710 field (casilla) extract.
pub fn pdt_field_file_name(year: &str, taxpayer_id: &str, field: u16) -> String {
    format!("0710{year}{taxpayer_id}{field:03}.txt")
}

/// File name of the PDT 710 trial balance extract.
pub fn trial_balance_file_name(taxpayer_id: &str, year: &str) -> String {
    format!("0710{taxpayer_id}{year}.txt")
}
