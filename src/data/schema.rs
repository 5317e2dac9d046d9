/// Column-name constants for the order extract.
/// Single source of truth - the loaders and the sample generator share these.
///
/// The names are the ones carried by the upstream `df_geo_v2.parquet`
/// extract, so a production file loads without any renaming step.

// ── Identity ────────────────────────────────────────────────────────────────
pub const OT: &str = "OT";

// ── Timestamps ──────────────────────────────────────────────────────────────
pub const DATE_OT: &str = "DATE_OT";
pub const DATE_DEPART: &str = "DATE_DEPART";
pub const DATE_ARRIVEE: &str = "DATE_ARRIVEE";
pub const DATE_LIVRAISON_PREVUE: &str = "DATE_LIVRAISON_PREVUE";
pub const DATE_DERNIER_EVNT: &str = "DATE_DERNIER_EVNT";

// ── Categoricals ────────────────────────────────────────────────────────────
pub const AGENCE_ENL: &str = "AGENCE_ENL";
pub const AGENCE_LIV: &str = "AGENCE_LIV";
pub const PRODUIT: &str = "PRODUIT";
pub const PRIORITE: &str = "PRIORITE";
pub const PAYS_ENL: &str = "PAYS_ENL";
pub const PAYS_LIV: &str = "PAYS_LIV";
pub const REGION_ENL: &str = "REGION_ENL";
pub const REGION_LIV: &str = "REGION_LIV";
pub const DEPT_ENL: &str = "DEPT_ENL";
pub const DEPT_LIV: &str = "DEPT_LIV";

// ── Quantities ──────────────────────────────────────────────────────────────
pub const NB_COLIS: &str = "NB_COLIS";
pub const POIDS_DECLARE: &str = "POIDS_DECLARE";

// ── Upstream-computed durations ─────────────────────────────────────────────
pub const DL_H: &str = "DL_H";
pub const DT_H: &str = "DT_H";
pub const DDK_H: &str = "DDK_H";
pub const DELAIS_RETARD: &str = "DELAIS_RETARD";

// ── Upstream-computed flags ─────────────────────────────────────────────────
pub const RETARD: &str = "RETARD";
pub const LIVRE_AVANT_13H: &str = "LIVRE_AVANT_13H";

/// Every column a valid order extract must provide, in file order.
pub const ALL: [&str; 24] = [
    OT,
    DATE_OT,
    DATE_DEPART,
    DATE_ARRIVEE,
    DATE_LIVRAISON_PREVUE,
    DATE_DERNIER_EVNT,
    AGENCE_ENL,
    AGENCE_LIV,
    PRODUIT,
    PRIORITE,
    PAYS_ENL,
    PAYS_LIV,
    REGION_ENL,
    REGION_LIV,
    DEPT_ENL,
    DEPT_LIV,
    NB_COLIS,
    POIDS_DECLARE,
    DL_H,
    DT_H,
    DDK_H,
    DELAIS_RETARD,
    RETARD,
    LIVRE_AVANT_13H,
];
