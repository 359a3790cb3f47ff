use crate::models::{CategoricalColumn, TransactionRecord};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Codes are assigned in sorted value order.
#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    classes: Vec<String>,
    codes: HashMap<String, u32>,
}

impl LabelEncoder {
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: Vec<String> = values
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let codes = classes
            .iter()
            .enumerate()
            .map(|(code, class)| (class.clone(), code as u32))
            .collect();

        Self { classes, codes }
    }

    pub fn transform(&self, value: &str) -> Option<u32> {
        self.codes.get(value).copied()
    }

    pub fn inverse_transform(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoricalEncoders {
    encoders: BTreeMap<CategoricalColumn, LabelEncoder>,
}

impl CategoricalEncoders {
    pub fn fit(records: &[TransactionRecord]) -> Self {
        let encoders = CategoricalColumn::ALL
            .iter()
            .map(|&column| {
                let encoder = LabelEncoder::fit(records.iter().map(|r| column.value(r)));
                (column, encoder)
            })
            .collect();

        Self { encoders }
    }

    pub fn encoder(&self, column: CategoricalColumn) -> Option<&LabelEncoder> {
        self.encoders.get(&column)
    }

    pub fn encode(&self, column: CategoricalColumn, value: &str) -> Option<u32> {
        self.encoder(column)?.transform(value)
    }

    pub fn decode(&self, column: CategoricalColumn, code: u32) -> Option<&str> {
        self.encoder(column)?.inverse_transform(code)
    }
}
