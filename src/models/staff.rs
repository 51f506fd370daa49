use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of salon roles, stored in the `funcao` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    #[serde(rename = "barbeiro")]
    Barber,
    #[serde(rename = "cabeleireiro")]
    Hairdresser,
    #[serde(rename = "manicure")]
    Manicurist,
    #[serde(rename = "esteticista_facial")]
    FacialEsthetician,
    #[serde(rename = "esteticista_corporal")]
    BodyEsthetician,
    #[serde(rename = "maquiador")]
    MakeupArtist,
    #[serde(rename = "designer_sobrancelha")]
    EyebrowDesigner,
    #[serde(rename = "massagista")]
    Masseuse,
    #[serde(rename = "depilador")]
    Depilator,
    #[serde(rename = "admin")]
    Admin,
}

impl StaffRole {
    pub const ALL: [StaffRole; 10] = [
        StaffRole::Barber,
        StaffRole::Hairdresser,
        StaffRole::Manicurist,
        StaffRole::FacialEsthetician,
        StaffRole::BodyEsthetician,
        StaffRole::MakeupArtist,
        StaffRole::EyebrowDesigner,
        StaffRole::Masseuse,
        StaffRole::Depilator,
        StaffRole::Admin,
    ];

    /// Slug as stored by the backing store.
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Barber => "barbeiro",
            StaffRole::Hairdresser => "cabeleireiro",
            StaffRole::Manicurist => "manicure",
            StaffRole::FacialEsthetician => "esteticista_facial",
            StaffRole::BodyEsthetician => "esteticista_corporal",
            StaffRole::MakeupArtist => "maquiador",
            StaffRole::EyebrowDesigner => "designer_sobrancelha",
            StaffRole::Masseuse => "massagista",
            StaffRole::Depilator => "depilador",
            StaffRole::Admin => "admin",
        }
    }

    /// Human-readable label shown on the profile page.
    pub fn label(&self) -> &'static str {
        match self {
            StaffRole::Barber => "Barbeiro",
            StaffRole::Hairdresser => "Cabeleireiro(a)",
            StaffRole::Manicurist => "Manicure",
            StaffRole::FacialEsthetician => "Esteticista Facial",
            StaffRole::BodyEsthetician => "Esteticista Corporal",
            StaffRole::MakeupArtist => "Maquiador(a)",
            StaffRole::EyebrowDesigner => "Designer de Sobrancelha",
            StaffRole::Masseuse => "Massagista",
            StaffRole::Depilator => "Depilador(a)",
            StaffRole::Admin => "Administrador",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StaffRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("Unknown staff role: {s}"))
    }
}

/// Identity and profile snapshot of a staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "funcao")]
    pub role: StaffRole,
    #[serde(rename = "ativo")]
    pub active: bool,
    #[serde(rename = "foto_url")]
    pub photo_url: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: String,
}

impl StaffRecord {
    pub fn with_photo_url(&self, photo_url: Option<String>) -> Self {
        Self {
            photo_url,
            ..self.clone()
        }
    }
}

/// Row shape returned by `autenticar_funcionario` and the `funcionarios` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StaffRow {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub funcao: String,
    pub ativo: bool,
    pub foto_url: Option<String>,
    pub telefone: Option<String>,
}

impl TryFrom<StaffRow> for StaffRecord {
    type Error = String;

    fn try_from(row: StaffRow) -> Result<Self, Self::Error> {
        Ok(StaffRecord {
            id: row.id,
            name: row.nome,
            email: row.email,
            role: row.funcao.parse()?,
            active: row.ativo,
            photo_url: row.foto_url,
            phone: row.telefone.unwrap_or_default(),
        })
    }
}
