use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fields printed on a CIN card, in display order.
///
/// Captions are bilingual (Malagasy / French) and mirror the card layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Cin,
    Nom,
    Prenoms,
    DateNaissance,
    LieuNaissance,
    Domicile,
    Arrondissement,
    Profession,
    Pere,
    Mere,
    LieuDelivrance,
    DateDelivrance,
}

impl FieldKey {
    pub const ALL: [FieldKey; 12] = [
        FieldKey::Cin,
        FieldKey::Nom,
        FieldKey::Prenoms,
        FieldKey::DateNaissance,
        FieldKey::LieuNaissance,
        FieldKey::Domicile,
        FieldKey::Arrondissement,
        FieldKey::Profession,
        FieldKey::Pere,
        FieldKey::Mere,
        FieldKey::LieuDelivrance,
        FieldKey::DateDelivrance,
    ];

    /// Column name used by the extraction service and the `correction` table.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Cin => "cin",
            FieldKey::Nom => "nom",
            FieldKey::Prenoms => "prenoms",
            FieldKey::DateNaissance => "date_naissance",
            FieldKey::LieuNaissance => "lieu_naissance",
            FieldKey::Domicile => "domicile",
            FieldKey::Arrondissement => "arrondissement",
            FieldKey::Profession => "profession",
            FieldKey::Pere => "pere",
            FieldKey::Mere => "mere",
            FieldKey::LieuDelivrance => "lieu_delivrance",
            FieldKey::DateDelivrance => "date_delivrance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Cin => "LAHARANA / N°:",
            FieldKey::Nom => "ANARANA / Nom:",
            FieldKey::Prenoms => "FANAMPIN'ANARANA / Prénoms:",
            FieldKey::DateNaissance => "TERAKA TAMIN'NY / Né(e) le:",
            FieldKey::LieuNaissance => "TAO / à:",
            FieldKey::Domicile => "FONENANA / Domicile:",
            FieldKey::Arrondissement => "BORIBORITANY / Arrondissement:",
            FieldKey::Profession => "ASA ATAO / Profession:",
            FieldKey::Pere => "RAY NITERAKA / Père:",
            FieldKey::Mere => "RENY NITERAKA / Mère:",
            FieldKey::LieuDelivrance => "NATAO TAO / Fait à:",
            FieldKey::DateDelivrance => "TAMIN'NY / Le:",
        }
    }
}

impl FromStr for FieldKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caption for any key; keys outside the card layout are shown raw.
pub fn label_for(key: &str) -> &str {
    key.parse::<FieldKey>().map(FieldKey::label).unwrap_or(key)
}

/// One identity entry as extracted, corrected, and finally persisted.
///
/// Serializes to a flat JSON object with one string per column, which is the
/// row shape of the `correction` table. Keys the extraction service returns
/// beyond the card layout are kept in `extra` and travel with the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub cin: String,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenoms: String,
    #[serde(default)]
    pub date_naissance: String,
    #[serde(default)]
    pub lieu_naissance: String,
    #[serde(default)]
    pub domicile: String,
    #[serde(default)]
    pub arrondissement: String,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub pere: String,
    #[serde(default)]
    pub mere: String,
    #[serde(default)]
    pub lieu_delivrance: String,
    #[serde(default)]
    pub date_delivrance: String,
    /// Keys outside the card layout, in the order they were received.
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

impl Record {
    /// Builds a record from `(key, value)` pairs; unknown keys land in `extra`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Record::default();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            match key.parse::<FieldKey>() {
                Ok(known) => *record.slot_mut(known) = value,
                Err(()) => {
                    record.extra.insert(key, value);
                }
            }
        }
        record
    }

    pub fn field(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Cin => &self.cin,
            FieldKey::Nom => &self.nom,
            FieldKey::Prenoms => &self.prenoms,
            FieldKey::DateNaissance => &self.date_naissance,
            FieldKey::LieuNaissance => &self.lieu_naissance,
            FieldKey::Domicile => &self.domicile,
            FieldKey::Arrondissement => &self.arrondissement,
            FieldKey::Profession => &self.profession,
            FieldKey::Pere => &self.pere,
            FieldKey::Mere => &self.mere,
            FieldKey::LieuDelivrance => &self.lieu_delivrance,
            FieldKey::DateDelivrance => &self.date_delivrance,
        }
    }

    fn slot_mut(&mut self, key: FieldKey) -> &mut String {
        match key {
            FieldKey::Cin => &mut self.cin,
            FieldKey::Nom => &mut self.nom,
            FieldKey::Prenoms => &mut self.prenoms,
            FieldKey::DateNaissance => &mut self.date_naissance,
            FieldKey::LieuNaissance => &mut self.lieu_naissance,
            FieldKey::Domicile => &mut self.domicile,
            FieldKey::Arrondissement => &mut self.arrondissement,
            FieldKey::Profession => &mut self.profession,
            FieldKey::Pere => &mut self.pere,
            FieldKey::Mere => &mut self.mere,
            FieldKey::LieuDelivrance => &mut self.lieu_delivrance,
            FieldKey::DateDelivrance => &mut self.date_delivrance,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match key.parse::<FieldKey>() {
            Ok(known) => Some(self.field(known)),
            Err(()) => self.extra.get(key).map(String::as_str),
        }
    }

    /// Replaces the value under `key`. Returns `false` when the record has no
    /// such field; extra keys are only writable if the record already has them.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        if let Ok(known) = key.parse::<FieldKey>() {
            *self.slot_mut(known) = value;
            return true;
        }
        match self.extra.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// All `(key, value)` pairs: card fields in layout order, then extras.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        FieldKey::ALL
            .into_iter()
            .map(|key| (key.as_str(), self.field(key)))
            .chain(
                self.extra
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            )
    }

    pub fn is_blank(&self) -> bool {
        self.entries().all(|(_, value)| value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_fall_back_to_raw_key() {
        assert_eq!(label_for("cin"), "LAHARANA / N°:");
        assert_eq!(label_for("date_delivrance"), "TAMIN'NY / Le:");
        assert_eq!(label_for("nationalite"), "nationalite");
    }

    #[test]
    fn from_pairs_routes_unknown_keys_to_extra() {
        let record = Record::from_pairs([("cin", "101"), ("nom", "A"), ("sexe", "F")]);
        assert_eq!(record.cin, "101");
        assert_eq!(record.nom, "A");
        assert_eq!(record.get("sexe"), Some("F"));
        assert_eq!(record.prenoms, "");
    }

    #[test]
    fn set_refuses_fields_the_record_does_not_have() {
        let mut record = Record::from_pairs([("sexe", "F")]);
        assert!(record.set("profession", "Mpampianatra".into()));
        assert!(record.set("sexe", "M".into()));
        assert!(!record.set("taille", "1m70".into()));
        assert_eq!(record.profession, "Mpampianatra");
        assert_eq!(record.get("sexe"), Some("M"));
        assert_eq!(record.get("taille"), None);
    }

    #[test]
    fn entries_list_card_fields_before_extras() {
        let record = Record::from_pairs([("zz", "1"), ("cin", "2")]);
        let keys: Vec<&str> = record.entries().map(|(k, _)| k).collect();
        assert_eq!(keys.len(), 13);
        assert_eq!(keys[0], "cin");
        assert_eq!(keys[11], "date_delivrance");
        assert_eq!(keys[12], "zz");
    }

    #[test]
    fn extras_keep_their_arrival_order() {
        let record = Record::from_pairs([("cin", "1"), ("zeta", "z"), ("alpha", "a")]);
        let keys: Vec<&str> = record.entries().skip(12).map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn serializes_as_flat_row() {
        let record = Record::from_pairs([("cin", "101"), ("sexe", "F")]);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["cin"], "101");
        assert_eq!(value["sexe"], "F");
        assert_eq!(value["mere"], "");

        let back: Record = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn default_record_is_blank() {
        assert!(Record::default().is_blank());
        assert!(!Record::from_pairs([("nom", "B")]).is_blank());
    }
}
