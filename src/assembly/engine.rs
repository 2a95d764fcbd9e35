//! 组装引擎
//!
//! 按输入顺序单次遍历题目，折叠成节点序列：
//!
//! 1. 分区变化时插入分区标题，除本次运行的第一次分区切换外先插入分页
//! 2. 累加总分
//! 3. 计分题记录识别码需求（不在这里生成图片）
//! 4. 题目块：0 分题在分区首位时使用标题样式；计分题带分值栏和作答区域
//! 5. 图示非空时原样附加

use tracing::debug;

use crate::assembly::node::{
    AnswerAffordance, Block, CodeImages, IdentifierCode, MarksCell, QuestionBlock,
};
use crate::assembly::markup;
use crate::models::exam::ExamContext;
use crate::models::question::QuestionRecord;

/// 折叠过程中的累积状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyState {
    /// 当前分区，尚未遇到任何分区时为 `None`
    pub current_section: Option<u32>,
    /// 自上次分区切换后还没有渲染任何块
    pub section_header_pending: bool,
    pub blocks: Vec<Block>,
    pub total_marks: u64,
}

impl AssemblyState {
    pub fn new() -> Self {
        Self {
            current_section: None,
            section_header_pending: true,
            blocks: Vec::new(),
            total_marks: 0,
        }
    }

    /// 处理一道题目，返回新的状态
    pub fn step(mut self, record: &QuestionRecord, ctx: &ExamContext) -> Self {
        if self.current_section != Some(record.section) {
            // 只有第一次分区切换不分页，与分区编号无关
            if self.current_section.is_some() {
                self.blocks.push(Block::PageBreak);
            }
            self.current_section = Some(record.section);
            self.section_header_pending = true;
            self.blocks.push(Block::SectionHeading {
                section: record.section,
            });
        }

        self.total_marks = self
            .total_marks
            .saturating_add(u64::from(record.total_marks));

        let block = if record.is_scored() {
            QuestionBlock {
                order_number: record.order_number,
                display_number: record.display_number.clone(),
                body: record.body.clone(),
                heading_style: false,
                marks: Some(MarksCell {
                    total_marks: record.total_marks,
                    code: IdentifierCode {
                        order_number: record.order_number,
                        payload: ctx.code_payload(record.order_number),
                    },
                }),
                affordance: AnswerAffordance::for_format(
                    &record.format,
                    record.total_marks,
                    &record.choices,
                ),
                diagram: diagram_of(record),
            }
        } else {
            QuestionBlock {
                order_number: record.order_number,
                display_number: record.display_number.clone(),
                body: record.body.clone(),
                heading_style: self.section_header_pending,
                marks: None,
                affordance: None,
                diagram: diagram_of(record),
            }
        };

        self.blocks.push(Block::Question(block));
        self.section_header_pending = false;
        self
    }
}

fn diagram_of(record: &QuestionRecord) -> Option<String> {
    if record.diagram_markup.is_empty() {
        None
    } else {
        Some(record.diagram_markup.clone())
    }
}

/// 组装结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyResult {
    pub blocks: Vec<Block>,
    pub total_marks: u64,
}

impl AssemblyResult {
    /// 所有计分题的识别码需求，按题目顺序
    pub fn code_requests(&self) -> Vec<&IdentifierCode> {
        self.blocks
            .iter()
            .filter_map(Block::as_question)
            .filter_map(|question| question.marks.as_ref())
            .map(|marks| &marks.code)
            .collect()
    }

    /// 识别码内容列表
    pub fn code_payloads(&self) -> Vec<String> {
        self.code_requests()
            .into_iter()
            .map(|code| code.payload.clone())
            .collect()
    }

    /// 序列化为试卷正文标记
    pub fn markup(&self, images: &CodeImages) -> String {
        markup::render_blocks(&self.blocks, images)
    }
}

/// 把题目序列组装成试卷正文
pub fn assemble(records: &[QuestionRecord], ctx: &ExamContext) -> AssemblyResult {
    let state = records
        .iter()
        .fold(AssemblyState::new(), |state, record| state.step(record, ctx));

    debug!(
        "组装完成: {} 个块, 总分 {}",
        state.blocks.len(),
        state.total_marks
    );

    AssemblyResult {
        blocks: state.blocks,
        total_marks: state.total_marks,
    }
}
