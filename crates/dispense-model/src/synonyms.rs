//! Header alias dictionary per logical field.

use crate::fields::LogicalField;

/// Ordered alias lists per logical field.
///
/// Alias order matters: the resolver binds the first alias that matches an
/// observed header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymTable {
    entries: Vec<(LogicalField, Vec<String>)>,
}

impl SynonymTable {
    /// Creates an empty table.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Replaces the alias list for `field`.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, field: LogicalField, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let aliases: Vec<String> = aliases.into_iter().map(Into::into).collect();
        match self.entries.iter_mut().find(|(existing, _)| *existing == field) {
            Some((_, list)) => *list = aliases,
            None => self.entries.push((field, aliases)),
        }
        self
    }

    /// Aliases for `field`, empty when the field has none.
    pub fn aliases(&self, field: LogicalField) -> &[String] {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == field)
            .map(|(_, aliases)| aliases.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::empty()
            .with_aliases(
                LogicalField::Date,
                [
                    "FECHA",
                    "FECHA_RECETA",
                    "FEC_RECETA",
                    "FEC_EMI",
                    "FECHA_EMISION",
                    "FECHA_DISPENSACION",
                    "FEC_DISP",
                    "DATE",
                ],
            )
            .with_aliases(
                LogicalField::ProductCode,
                [
                    "COD_PRODUCTO",
                    "COD_PROD",
                    "COD_MEDICAMENTO",
                    "CODIGO_PRODUCTO",
                    "COD_ITEM",
                    "COD_ARTICULO",
                    "ITEM",
                    "COD",
                ],
            )
            .with_aliases(
                LogicalField::Quantity,
                [
                    "CANTIDAD",
                    "CANT",
                    "QTY",
                    "CANT_SOL",
                    "CANT_ENT",
                    "CANT_DISP",
                    "CANTIDAD_ENTREGADA",
                    "CANTIDAD_DISPENSADA",
                ],
            )
            .with_aliases(
                LogicalField::Warehouse,
                [
                    "ALMACEN",
                    "COD_ALMACEN",
                    "DEPOSITO",
                    "FARMACIA",
                    "BODEGA",
                    "ALM",
                    "ALMACEN_ORIGEN",
                    "ALMACEN_DESTINO",
                ],
            )
            .with_aliases(
                LogicalField::ServiceUnit,
                ["SERVICIO", "DEPENDENCIA", "UNIDAD", "SECTOR", "AREA", "SALA"],
            )
            .with_aliases(
                LogicalField::PrescriberCode,
                [
                    "COD_MEDICO",
                    "COD_PROF",
                    "COD_PRESCRIPTOR",
                    "ID_MEDICO",
                    "MEDICO_COD",
                ],
            )
            .with_aliases(
                LogicalField::PatientId,
                [
                    "CEDULA",
                    "CI",
                    "NRO_DOC",
                    "DOCUMENTO",
                    "PACIENTE_CI",
                    "ID_PACIENTE",
                ],
            )
            .with_aliases(
                LogicalField::ProductDescription,
                [
                    "DESC_PRODUCTO",
                    "DESCRIPCION",
                    "PRODUCTO",
                    "NOMBRE_PRODUCTO",
                    "ITEM_DESC",
                    "MEDICAMENTO",
                ],
            )
    }
}
