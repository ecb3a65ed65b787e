use std::collections::BTreeMap;
use std::fmt;
use color_eyre::eyre::bail;
use serde::Serialize;

/// a postal code as typed by the user, trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalCode(String);

impl PostalCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for PostalCode {
    type Error = color_eyre::eyre::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            bail!(EmptyInput);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when the input is blank. The lookup is never attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyInput;

impl fmt::Display for EmptyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("postal code is empty")
    }
}

impl std::error::Error for EmptyInput {}

/// The fields ViaCEP may return, in display order.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Cep,
    Logradouro,
    Complemento,
    Unidade,
    Bairro,
    Localidade,
    Uf,
    Estado,
    Regiao,
    Ibge,
    Gia,
    Ddd,
    Siafi,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Cep,
        Field::Logradouro,
        Field::Complemento,
        Field::Unidade,
        Field::Bairro,
        Field::Localidade,
        Field::Uf,
        Field::Estado,
        Field::Regiao,
        Field::Ibge,
        Field::Gia,
        Field::Ddd,
        Field::Siafi,
    ];

    /// key of the field in the response body
    pub fn key(&self) -> &'static str {
        match self {
            Field::Cep => "cep",
            Field::Logradouro => "logradouro",
            Field::Complemento => "complemento",
            Field::Unidade => "unidade",
            Field::Bairro => "bairro",
            Field::Localidade => "localidade",
            Field::Uf => "uf",
            Field::Estado => "estado",
            Field::Regiao => "regiao",
            Field::Ibge => "ibge",
            Field::Gia => "gia",
            Field::Ddd => "ddd",
            Field::Siafi => "siafi",
        }
    }

    /// label shown next to the value in text output
    pub fn label(&self) -> &'static str {
        match self {
            Field::Cep => "CEP",
            Field::Logradouro => "Logradouro",
            Field::Complemento => "Complemento",
            Field::Unidade => "Unidade",
            Field::Bairro => "Bairro",
            Field::Localidade => "Cidade",
            Field::Uf => "UF",
            Field::Estado => "Estado",
            Field::Regiao => "Região",
            Field::Ibge => "IBGE",
            Field::Gia => "GIA",
            Field::Ddd => "DDD",
            Field::Siafi => "SIAFI",
        }
    }
}

/// Address fields extracted from one response.
///
/// Every known field is present; a field missing from the response holds an
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LookupResult {
    values: BTreeMap<Field, String>,
}

impl LookupResult {
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// (field, value) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

impl FromIterator<(Field, String)> for LookupResult {
    fn from_iter<T: IntoIterator<Item = (Field, String)>>(iter: T) -> Self {
        let mut values = Field::ALL.iter()
            .map(|field| (*field, String::new()))
            .collect::<BTreeMap<_, _>>();
        values.extend(iter);
        Self { values }
    }
}

/// Result of a single lookup.
#[derive(Debug)]
pub enum LookupOutcome {
    Found(LookupResult),
    /// the service reported the code as unknown
    NotFound,
    /// the request or the response could not complete, the report holds the cause
    Failed(color_eyre::Report),
}

impl LookupOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }
}
