//! Interface text in both display languages.

use crate::session::OutputLanguage;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language the interface is displayed in. Independent of the table language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UiLanguage {
    #[default]
    Eng,
    Rus,
}

impl FromStr for UiLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ENG" => Ok(UiLanguage::Eng),
            "RUS" => Ok(UiLanguage::Rus),
            _ => Err(format!("unknown interface language '{s}' (expected ENG or RUS)")),
        }
    }
}

/// Scanners listed on the form. Shown for reference only, never submitted.
pub const SCANNERS: [&str; 4] = ["REDCheck", "Max Patrol", "Nexpose", "Acunetix"];

#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub select_scanner: &'static str,
    pub table_language: &'static str,
    pub english: &'static str,
    pub russian: &'static str,
    pub uploaded_file: &'static str,
    pub no_file: &'static str,
    pub upload: &'static str,
    pub process: &'static str,
    pub processing: &'static str,
    pub download: &'static str,
    pub failed: &'static str,
}

static ENG: Labels = Labels {
    title: "Create exploits table",
    select_scanner: "Select Vulnerability Scanner",
    table_language: "Language table",
    english: "English",
    russian: "Russian",
    uploaded_file: "Uploaded File",
    no_file: "No file uploaded",
    upload: "Upload",
    process: "Process",
    processing: "Processing...",
    download: "Download table",
    failed: "Failed to create the table",
};

static RUS: Labels = Labels {
    title: "Создать таблицу c эксплоитами",
    select_scanner: "Выберите сканер уязвимостей",
    table_language: "Язык таблицы",
    english: "Английский",
    russian: "Русский",
    uploaded_file: "Загруженный файл",
    no_file: "Файл не загружен",
    upload: "Загрузить",
    process: "Обработать",
    processing: "Обработка...",
    download: "Скачать таблицу",
    failed: "Не удалось создать таблицу",
};

impl Labels {
    pub fn for_language(language: UiLanguage) -> &'static Labels {
        match language {
            UiLanguage::Eng => &ENG,
            UiLanguage::Rus => &RUS,
        }
    }

    pub fn table_language_name(&self, language: OutputLanguage) -> &'static str {
        match language {
            OutputLanguage::Eng => self.english,
            OutputLanguage::Rus => self.russian,
        }
    }

    /// "Uploaded File: name", or the no-file line.
    pub fn file_line(&self, file_name: Option<&str>) -> String {
        match file_name {
            Some(name) => format!("{}: {}", self.uploaded_file, name),
            None => self.no_file.to_string(),
        }
    }
}
