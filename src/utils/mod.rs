// Utilidades compartidas

pub mod storage;
