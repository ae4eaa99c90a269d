// ==========================================
// Gestão de Leitura - Leitor de Documentos
// ==========================================
// Suporta: Excel binário legado (.xls) / Excel moderno (.xlsx) / CSV
// Entrada: bytes brutos vindos da camada externa de captação
// Saída: grade posicional de células (linhas × colunas)
// ==========================================
// Os relatórios da concessionária não têm linha de cabeçalho
// confiável; a grade é posicional e a suposição de layout
// fica declarada em layout.rs
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_from_rs, Data, Reader, Xls, Xlsx};
use std::io::Cursor;
use std::path::Path;

// ==========================================
// FileKind - tipo de arquivo detectado
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Xls,  // Planilha binária legada (contêiner OLE2)
    Xlsx, // Planilha moderna baseada em XML (contêiner zip)
    Csv,  // Texto delimitado
}

// ==========================================
// RawDocument - documento bruto imutável
// ==========================================
// Produzido pela camada externa de captação de arquivos,
// consumido uma vez pelo classificador/parsers
#[derive(Debug, Clone)]
pub struct RawDocument {
    bytes: Vec<u8>,
    kind: FileKind,
}

impl RawDocument {
    /// Cria um documento a partir de bytes, detectando o tipo
    /// pelos bytes mágicos (OLE2 → .xls, zip → .xlsx, senão CSV)
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let kind = sniff_kind(&bytes);
        Self { bytes, kind }
    }

    /// Lê um arquivo do disco e detecta o tipo
    pub fn from_path<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Detecta o tipo de arquivo pelos bytes iniciais
fn sniff_kind(bytes: &[u8]) -> FileKind {
    if bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0]) {
        FileKind::Xls
    } else if bytes.starts_with(b"PK") {
        FileKind::Xlsx
    } else {
        FileKind::Csv
    }
}

// ==========================================
// Cell - valor de célula tipado
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// Texto da célula (números inteiros sem casa decimal)
    pub fn as_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Cell::Empty => String::new(),
        }
    }

    /// Valor numérico da célula, quando interpretável
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
            Cell::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

/// Grade posicional de células (linhas × colunas)
pub type SheetGrid = Vec<Vec<Cell>>;

// ==========================================
// Leitura de grade
// ==========================================

/// Converte o documento bruto em grade posicional,
/// despachando pelo tipo detectado
pub fn parse_grid(doc: &RawDocument) -> ImportResult<SheetGrid> {
    match doc.kind() {
        FileKind::Xls => parse_xls_grid(doc.bytes()),
        FileKind::Xlsx => parse_xlsx_grid(doc.bytes()),
        FileKind::Csv => parse_csv_grid(doc.bytes()),
    }
}

/// Planilha binária legada (.xls)
fn parse_xls_grid(bytes: &[u8]) -> ImportResult<SheetGrid> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook: Xls<_> = open_workbook_from_rs(cursor)
        .map_err(|e: calamine::XlsError| ImportError::SpreadsheetParseError(e.to_string()))?;
    first_sheet_grid(&mut workbook)
}

/// Planilha moderna (.xlsx)
fn parse_xlsx_grid(bytes: &[u8]) -> ImportResult<SheetGrid> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor)
        .map_err(|e: calamine::XlsxError| ImportError::SpreadsheetParseError(e.to_string()))?;
    first_sheet_grid(&mut workbook)
}

/// Lê a primeira aba do workbook como grade
fn first_sheet_grid<R>(workbook: &mut R) -> ImportResult<SheetGrid>
where
    R: Reader<Cursor<Vec<u8>>>,
    R::Error: std::fmt::Display,
{
    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names.first().ok_or(ImportError::EmptyWorkbook)?.clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::SpreadsheetParseError(e.to_string()))?;

    let mut grid = Vec::new();
    for row in range.rows() {
        let cells: Vec<Cell> = row.iter().map(data_to_cell).collect();

        // Ignora linhas totalmente vazias
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        grid.push(cells);
    }

    Ok(grid)
}

/// Converte o valor calamine em célula do domínio
fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(trimmed.to_string())
            }
        }
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        other => {
            let text = other.to_string();
            if text.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(text.trim().to_string())
            }
        }
    }
}

/// Texto delimitado (.csv) sem cabeçalho, posicional
fn parse_csv_grid(bytes: &[u8]) -> ImportResult<SheetGrid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // Permite linhas de tamanhos diferentes
        .from_reader(bytes);

    let mut grid = Vec::new();
    for result in reader.records() {
        let record = result?;
        let cells: Vec<Cell> = record
            .iter()
            .map(|v| {
                let trimmed = v.trim();
                if trimmed.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(trimmed.to_string())
                }
            })
            .collect();

        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        grid.push(cells);
    }

    Ok(grid)
}

/// Célula em uma posição da linha (Empty quando a coluna não existe)
pub fn cell_at(row: &[Cell], index: usize) -> Cell {
    row.get(index).cloned().unwrap_or(Cell::Empty)
}
