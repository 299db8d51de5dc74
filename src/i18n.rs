//! Built-in button and title translations.

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Zh,
    Es,
    Pt,
    Ru,
    Ja,
    De,
    Fr,
}

impl Lang {
    /// Parse a language tag like `"en"` or `"zh-CN"`. Unknown tags fall
    /// back to English.
    pub fn from_tag(tag: &str) -> Lang {
        let primary = tag.split(['-', '_']).next().unwrap_or("");
        match primary.to_ascii_lowercase().as_str() {
            "zh" => Lang::Zh,
            "es" => Lang::Es,
            "pt" => Lang::Pt,
            "ru" => Lang::Ru,
            "ja" => Lang::Ja,
            "de" => Lang::De,
            "fr" => Lang::Fr,
            _ => Lang::En,
        }
    }
}

/// The fixed set of translatable terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Ok,
    Confirm,
    Cancel,
    Save,
    Prompt,
    Sure,
}

/// Resolves [`Term`]s for one language.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexicon {
    lang: Lang,
}

impl Lexicon {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn get(&self, term: Term) -> &'static str {
        match self.lang {
            Lang::En => match term {
                Term::Ok => "OK",
                Term::Confirm => "Confirm",
                Term::Cancel => "Cancel",
                Term::Save => "Save",
                Term::Prompt => "Prompt",
                Term::Sure => "Are you sure?",
            },
            Lang::Zh => match term {
                Term::Ok => "确定",
                Term::Confirm => "确认",
                Term::Cancel => "取消",
                Term::Save => "保存",
                Term::Prompt => "提示",
                Term::Sure => "您确定吗？",
            },
            Lang::Es => match term {
                Term::Ok => "Aceptar",
                Term::Confirm => "Confirmar",
                Term::Cancel => "Cancelar",
                Term::Save => "Guardar",
                Term::Prompt => "Aviso",
                Term::Sure => "¿Está seguro?",
            },
            Lang::Pt => match term {
                Term::Ok => "OK",
                Term::Confirm => "Confirmar",
                Term::Cancel => "Cancelar",
                Term::Save => "Salvar",
                Term::Prompt => "Aviso",
                Term::Sure => "Tem certeza?",
            },
            Lang::Ru => match term {
                Term::Ok => "ОК",
                Term::Confirm => "Подтвердить",
                Term::Cancel => "Отмена",
                Term::Save => "Сохранить",
                Term::Prompt => "Подсказка",
                Term::Sure => "Вы уверены?",
            },
            Lang::Ja => match term {
                Term::Ok => "OK",
                Term::Confirm => "確認",
                Term::Cancel => "キャンセル",
                Term::Save => "保存",
                Term::Prompt => "プロンプト",
                Term::Sure => "本当によろしいですか？",
            },
            Lang::De => match term {
                Term::Ok => "OK",
                Term::Confirm => "Bestätigen",
                Term::Cancel => "Abbrechen",
                Term::Save => "Speichern",
                Term::Prompt => "Eingabe",
                Term::Sure => "Sind Sie sicher?",
            },
            Lang::Fr => match term {
                Term::Ok => "OK",
                Term::Confirm => "Confirmer",
                Term::Cancel => "Annuler",
                Term::Save => "Enregistrer",
                Term::Prompt => "Invite",
                Term::Sure => "Êtes-vous sûr ?",
            },
        }
    }
}
