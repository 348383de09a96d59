use lopdf::{Document, Object};
use tracing::{debug, info, warn};

use crate::utils::{AnalyzerError, AnalyzerResult};

pub struct PdfSplitter;

impl PdfSplitter {
    pub fn new() -> Self {
        Self
    }

    /// 将PDF拆分为单页PDF，按页码顺序返回
    pub fn split(&self, document: &[u8]) -> AnalyzerResult<Vec<Vec<u8>>> {
        let doc = Document::load_mem(document)
            .map_err(|e| AnalyzerError::PdfError(format!("PDF加载失败: {}", e)))?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(AnalyzerError::PdfError("PDF中没有页面".to_string()));
        }
        info!("PDF共 {} 页", page_numbers.len());

        let mut pages = Vec::with_capacity(page_numbers.len());
        for &page in &page_numbers {
            let others: Vec<u32> = page_numbers
                .iter()
                .copied()
                .filter(|p| *p != page)
                .collect();

            let mut single = doc.clone();
            single.delete_pages(&others);
            Self::fix_page_count(&mut single);
            single.prune_objects();

            let mut buffer = Vec::new();
            single
                .save_to(&mut buffer)
                .map_err(|e| AnalyzerError::PdfError(format!("第 {} 页保存失败: {}", page, e)))?;
            debug!("第 {} 页: {} 字节", page, buffer.len());
            pages.push(buffer);
        }

        Ok(pages)
    }

    // 单页文档的页面树根节点 Count 固定为 1
    fn fix_page_count(doc: &mut Document) {
        let pages_id = doc
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .and_then(|root| doc.get_dictionary(root))
            .and_then(|catalog| catalog.get(b"Pages"))
            .and_then(Object::as_reference);

        let pages_id = match pages_id {
            Ok(id) => id,
            Err(e) => {
                warn!("未找到页面树根节点: {}", e);
                return;
            }
        };

        if let Ok(pages) = doc.get_object_mut(pages_id).and_then(Object::as_dict_mut) {
            pages.set("Count", 1i64);
        }
    }
}
