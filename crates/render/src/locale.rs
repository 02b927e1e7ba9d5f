use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const MESES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Language of the generated text: date stamp, footer and notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    /// Long-form date, e.g. "18 de octubre de 2026".
    pub fn long_date(self, date: NaiveDate) -> String {
        let month = date.month0() as usize;
        match self {
            Locale::Es => format!("{} de {} de {}", date.day(), MESES[month], date.year()),
            Locale::En => format!("{} {}, {}", MONTHS[month], date.day(), date.year()),
        }
    }

    pub fn footer_label(self, brand: &str, page: usize, total: usize) -> String {
        match self {
            Locale::Es => format!("{brand} - Página {page} de {total}"),
            Locale::En => format!("{brand} - Page {page} of {total}"),
        }
    }

    pub fn export_success(self) -> &'static str {
        match self {
            Locale::Es => "PDF generado exitosamente",
            Locale::En => "PDF generated successfully",
        }
    }

    pub fn export_failure(self) -> &'static str {
        match self {
            Locale::Es => "Error al generar el PDF",
            Locale::En => "Failed to generate the PDF",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            other => Err(format!("Unknown locale: {}", other)),
        }
    }
}
