//! Column layout of the AWB import file.
//!
//! Keys are looked up in each shipment; labels only appear in the header
//! row. The layout is fixed by the API, including its odd labels
//! (`IBAN`, `destinatar_cod`, labels with spaces).

/// Ordered `(field_key, output_label)` pairs.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSchema(&'static [(&'static str, &'static str)]);

impl ColumnSchema {
    pub const fn new(columns: &'static [(&'static str, &'static str)]) -> Self {
        Self(columns)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.0.iter().map(|(key, _)| *key)
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.0.iter().map(|(_, label)| *label)
    }

    pub fn columns(&self) -> &'static [(&'static str, &'static str)] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Columns of `import_awb_integrat.php`.
pub const AWB_COLUMNS: ColumnSchema = ColumnSchema::new(&[
    // Sender
    ("expeditor_nume", "expeditor_nume"),
    ("expeditor_persoana_contact", "expeditor_persoana_contact"),
    ("expeditor_telefon", "expeditor_telefon"),
    ("expeditor_fax", "expeditor_fax"),
    ("expeditor_email", "expeditor_email"),
    ("expeditor_judet", "expeditor_judet"),
    ("expeditor_localitatea", "expeditor_localitatea"),
    ("expeditor_strada", "expeditor_strada"),
    ("expeditor_nr", "expeditor_nr"),
    ("expeditor_cod postal", "expeditor_cod postal"),
    ("expeditor_bloc", "expeditor_bloc"),
    ("expeditor_scara", "expeditor_scara"),
    ("expeditor_etaj", "expeditor_etaj"),
    ("expeditor_apartament", "expeditor_apartament"),
    // Recipient
    ("destinatar_nume", "destinatar_nume"),
    ("destinatar_persoana_contact", "destinatar_persoana_contact"),
    ("destinatar_telefon", "destinatar_telefon"),
    ("destinatar_fax", "destinatar_fax"),
    ("destinatar_email", "destinatar_email"),
    ("destinatar_judet", "destinatar_judet"),
    ("destinatar_localitatea", "destinatar_localitatea"),
    ("destinatar_strada", "destinatar_strada"),
    ("destinatar_nr", "destinatar_nr"),
    ("destinatar_cod postal", "destinatar_cod"),
    ("destinatar_bloc", "destinatar_bloc"),
    ("destinatar_scara", "destinatar_scara"),
    ("destinatar_etaj", "destinatar_etaj"),
    ("destinatar_apartament", "destinatar_apartament"),
    // Service and parcel
    ("tip_serviciu", "tip_serviciu"),
    ("banca", "banca"),
    ("iban", "IBAN"),
    ("nr_plicuri", "nr_plicuri"),
    ("nr_colete", "nr_colete"),
    ("greutate", "greutate"),
    ("plata_expeditie", "plata_expeditie"),
    ("ramburs", "ramburs"),
    ("plata_ramburs_la", "plata_ramburs_la"),
    ("valoare_declarata", "valoare_declarata"),
    ("observatii", "observatii"),
    ("continut", "continut"),
    ("inaltime_pachet", "inaltime_pachet"),
    ("latime_pachet", "latime_pachet"),
    ("lungime_pachet", "lungime_pachet"),
    ("restituire", "restituire"),
    ("centru_cost", "centru_cost"),
    ("awb_retur", "awb_retur"),
    ("optiuni", "optiuni"),
    ("packing", "packing"),
    ("date personala packing", "date personala packing"),
]);
