//! Package Module
//!
//! XLSXパッケージ（ZIPアーカイブ）を開き、ワークブックのリレーションシップを
//! たどってワークシートパートと共有文字列パートを特定するモジュール。

use std::io::{BufReader, Read, Seek, SeekFrom};

use quick_xml::events::BytesStart;
use zip::read::ZipFile;
use zip::ZipArchive;

use crate::error::{Result, XlsxRowsError};
use crate::parser::events::{attribute, drive, MarkupHandler};
use crate::parser::SharedStringTable;
use crate::security::{validate_zip_path, SecurityConfig};

const PACKAGE_RELATIONSHIPS: &str = "_rels/.rels";
const DEFAULT_WORKBOOK: &str = "xl/workbook.xml";
const DEFAULT_SHARED_STRINGS: &str = "xl/sharedStrings.xml";

const REL_OFFICE_DOCUMENT: &str = "/officeDocument";
const REL_WORKSHEET: &str = "/worksheet";
const REL_SHARED_STRINGS: &str = "/sharedStrings";

/// ワークシートパート
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WorksheetPart {
    /// シート名（`<sheet name="...">`）
    pub name: String,
    /// アーカイブ内のパス（例: `xl/worksheets/sheet1.xml`）
    pub path: String,
}

#[derive(Debug, Clone)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
    external: bool,
}

/// 開いたXLSXパッケージ
///
/// ドロップされるとアーカイブ（と内部のリーダー）が解放されます。
pub(crate) struct Package<R: Read + Seek> {
    archive: ZipArchive<R>,
    workbook_path: String,
    workbook_rels: Vec<Relationship>,
}

impl<R: Read + Seek> Package<R> {
    /// パッケージを開く
    ///
    /// 入力サイズとアーカイブ内容をセキュリティ制限で検証し、
    /// ワークブックパートとそのリレーションシップを読み込みます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Package)` - パッケージを開けた場合
    /// * `Err(XlsxRowsError::Package)` - ZIPとして読めない、ワークブックが見つからない場合
    /// * `Err(XlsxRowsError::SecurityViolation)` - セキュリティ制限に違反した場合
    pub fn open(mut reader: R, security: &SecurityConfig) -> Result<Self> {
        let size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;
        security.check_input_size(size)?;

        let mut archive = ZipArchive::new(reader)?;
        security.check_archive(&mut archive)?;
        log::debug!("Opened package with {} entries ({} bytes)", archive.len(), size);

        let workbook_path = match read_relationships(&mut archive, PACKAGE_RELATIONSHIPS)? {
            Some(rels) => rels
                .iter()
                .find(|rel| !rel.external && rel.rel_type.ends_with(REL_OFFICE_DOCUMENT))
                .map(|rel| resolve_target("", &rel.target))
                .transpose()?
                .unwrap_or_else(|| DEFAULT_WORKBOOK.to_string()),
            None => DEFAULT_WORKBOOK.to_string(),
        };

        if archive.by_name(&workbook_path).is_err() {
            return Err(XlsxRowsError::Package(format!(
                "workbook part '{}' not found",
                workbook_path
            )));
        }

        let rels_path = relationships_path(&workbook_path);
        let workbook_rels = read_relationships(&mut archive, &rels_path)?.ok_or_else(|| {
            XlsxRowsError::Package(format!("workbook relationships '{}' not found", rels_path))
        })?;

        Ok(Self {
            archive,
            workbook_path,
            workbook_rels,
        })
    }

    /// 共有文字列テーブルを読み込む
    ///
    /// 共有文字列パートが存在しない場合は空のテーブルを返します。
    pub fn shared_strings(&mut self) -> Result<SharedStringTable> {
        let path = match self
            .workbook_rels
            .iter()
            .find(|rel| !rel.external && rel.rel_type.ends_with(REL_SHARED_STRINGS))
        {
            Some(rel) => resolve_target(parent_dir(&self.workbook_path), &rel.target)?,
            None => DEFAULT_SHARED_STRINGS.to_string(),
        };

        let file = match self.archive.by_name(&path) {
            Ok(file) => file,
            Err(_) => {
                log::debug!("No shared strings part at '{}'", path);
                return Ok(SharedStringTable::default());
            }
        };
        let table = SharedStringTable::from_reader(BufReader::new(file))?;
        log::debug!("Loaded {} shared strings from '{}'", table.len(), path);
        Ok(table)
    }

    /// ワークシートパートをワークブックの列挙順で取得
    ///
    /// `<sheets>`内の`<sheet>`の順に並びます。ワークシート以外
    /// （グラフシートなど）のリレーションシップはスキップします。
    pub fn worksheets(&mut self) -> Result<Vec<WorksheetPart>> {
        let workbook = self.archive.by_name(&self.workbook_path)?;
        let mut handler = WorkbookHandler::default();
        drive(BufReader::new(workbook), &mut handler)?;

        let base = parent_dir(&self.workbook_path);
        let mut parts = Vec::with_capacity(handler.sheets.len());
        for (name, id) in handler.sheets {
            let rel = self
                .workbook_rels
                .iter()
                .find(|rel| rel.id == id)
                .ok_or_else(|| {
                    XlsxRowsError::Package(format!(
                        "relationship '{}' for sheet '{}' not found",
                        id, name
                    ))
                })?;

            if rel.external || !rel.rel_type.ends_with(REL_WORKSHEET) {
                log::debug!("Skipping sheet '{}' of type '{}'", name, rel.rel_type);
                continue;
            }

            let path = resolve_target(base, &rel.target)?;
            parts.push(WorksheetPart { name, path });
        }

        Ok(parts)
    }

    /// パートのストリームを開く
    ///
    /// 返されるリーダーはパッケージを借用するため、次のパートを開く前に
    /// ドロップされます。
    pub fn open_part(&mut self, path: &str) -> Result<BufReader<ZipFile<'_>>> {
        let file = self
            .archive
            .by_name(path)
            .map_err(|_| XlsxRowsError::Package(format!("part '{}' not found", path)))?;
        Ok(BufReader::new(file))
    }
}

/// `.rels`パートを読み込む（存在しない場合は`None`）
fn read_relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<Option<Vec<Relationship>>> {
    let file = match archive.by_name(path) {
        Ok(file) => file,
        Err(_) => return Ok(None),
    };

    let mut handler = RelationshipsHandler::default();
    drive(BufReader::new(file), &mut handler)?;
    Ok(Some(handler.relationships))
}

/// パートに対応する`.rels`のパス（`xl/workbook.xml` -> `xl/_rels/workbook.xml.rels`）
fn relationships_path(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, name)) => format!("{}/_rels/{}.rels", dir, name),
        None => format!("_rels/{}.rels", part),
    }
}

fn parent_dir(part: &str) -> &str {
    part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// リレーションシップのターゲットをアーカイブ内のパスに解決
///
/// `/`で始まるターゲットはパッケージルートから、それ以外は`base`から解決します。
fn resolve_target(base: &str, target: &str) -> Result<String> {
    let (start, target) = match target.strip_prefix('/') {
        Some(absolute) => ("", absolute),
        None => (base, target),
    };

    let mut segments: Vec<&str> = start.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop().ok_or_else(|| {
                    XlsxRowsError::Package(format!("relationship target '{}' escapes the package", target))
                })?;
            }
            segment => segments.push(segment),
        }
    }

    let path = segments.join("/");
    validate_zip_path(&path).map_err(XlsxRowsError::SecurityViolation)?;
    Ok(path)
}

#[derive(Default)]
struct RelationshipsHandler {
    relationships: Vec<Relationship>,
}

impl MarkupHandler for RelationshipsHandler {
    fn start_element(&mut self, element: &BytesStart<'_>) -> Result<()> {
        if element.local_name().as_ref() == b"Relationship" {
            let id = attribute(element, b"Id")?.unwrap_or_default();
            let rel_type = attribute(element, b"Type")?.unwrap_or_default();
            let target = attribute(element, b"Target")?.unwrap_or_default();
            let external = attribute(element, b"TargetMode")?.as_deref() == Some("External");
            self.relationships.push(Relationship {
                id,
                rel_type,
                target,
                external,
            });
        }
        Ok(())
    }

    fn characters(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn end_element(&mut self, _local_name: &[u8]) -> Result<()> {
        Ok(())
    }
}

/// `<sheet name="..." r:id="..."/>`を列挙順に収集する
#[derive(Default)]
struct WorkbookHandler {
    sheets: Vec<(String, String)>,
}

impl MarkupHandler for WorkbookHandler {
    fn start_element(&mut self, element: &BytesStart<'_>) -> Result<()> {
        if element.local_name().as_ref() != b"sheet" {
            return Ok(());
        }

        let mut name = String::new();
        let mut id = None;
        for attr in element.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = attr.key;
            match (key.prefix().is_some(), key.local_name().as_ref()) {
                (false, b"name") => name = attr.unescape_value()?.into_owned(),
                // 名前空間接頭辞は通常`r`だが、ファイルによって異なる
                (true, b"id") => id = Some(attr.unescape_value()?.into_owned()),
                _ => {}
            }
        }

        let id = id.ok_or_else(|| {
            XlsxRowsError::Package(format!("sheet '{}' has no relationship id", name))
        })?;
        self.sheets.push((name, id));
        Ok(())
    }

    fn characters(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn end_element(&mut self, _local_name: &[u8]) -> Result<()> {
        Ok(())
    }
}
