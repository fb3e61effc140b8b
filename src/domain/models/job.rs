// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 分析作业实体
///
/// 表示一次端到端的引用分析运行。作业拥有目标域名、
/// 请求的月份列表、进度计数器以及终态信息，
/// 仅由编排器推进其生命周期。作业永不删除，保留为审计记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// 作业唯一标识符
    pub id: Uuid,
    /// 发起分析的用户ID
    pub user_id: Uuid,
    /// 目标域名
    pub domain: String,
    /// 作业种类，区分首次分析与竞争对手分析
    pub kind: JobKind,
    /// 作业状态
    pub status: JobStatus,
    /// 请求的月份列表（YYYY-MM）
    pub months: Vec<String>,
    /// 整体进度（0-100）
    pub progress: i32,
    /// 已发现引用的累计数量
    pub total_citations: i32,
    /// 失败时记录的错误信息
    pub error_message: Option<String>,
    /// 竞争对手作业记录触发比较的"本方"域名
    pub requested_by_domain: Option<String>,
    /// 开始执行时间
    pub started_at: Option<DateTime<FixedOffset>>,
    /// 完成时间
    pub completed_at: Option<DateTime<FixedOffset>>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 最后更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 作业种类枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// 首次分析作业，创建时即进入处理状态
    #[default]
    Initial,
    /// 竞争对手作业，由比较流程创建
    Competitor,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobKind::Initial => write!(f, "initial"),
            JobKind::Competitor => write!(f, "competitor"),
        }
    }
}

impl FromStr for JobKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initial" => Ok(JobKind::Initial),
            "competitor" => Ok(JobKind::Competitor),
            _ => Err(()),
        }
    }
}

/// 作业状态枚举
///
/// 状态转换遵循以下流程：
/// Pending → Processing → Completed/Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// 等待中，作业已创建但尚未被驱动
    #[default]
    Pending,
    /// 处理中，管道正在执行
    Processing,
    /// 已完成
    Completed,
    /// 已失败
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Processing => write!(f, "processing"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for JobStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "processing" => Ok(JobStatus::Processing),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            _ => Err(()),
        }
    }
}

/// 领域错误类型
#[derive(Error, Debug)]
pub enum DomainError {
    /// 无效的状态转换
    #[error("Invalid state transition")]
    InvalidStateTransition,

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl Job {
    /// 创建一个新的作业
    ///
    /// 首次分析作业创建时即为处理中状态并记录开始时间；
    /// 竞争对手作业创建为等待中，由编排器负责后续转换。
    pub fn new(
        user_id: Uuid,
        domain: String,
        kind: JobKind,
        months: Vec<String>,
        requested_by_domain: Option<String>,
    ) -> Self {
        let now: DateTime<FixedOffset> = Utc::now().into();
        let (status, started_at) = match kind {
            JobKind::Initial => (JobStatus::Processing, Some(now)),
            JobKind::Competitor => (JobStatus::Pending, None),
        };

        Self {
            id: Uuid::new_v4(),
            user_id,
            domain,
            kind,
            status,
            months,
            progress: 0,
            total_citations: 0,
            error_message: None,
            requested_by_domain,
            started_at,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 启动作业
    ///
    /// 将作业状态从Pending变更为Processing
    pub fn start(mut self) -> Result<Self, DomainError> {
        match self.status {
            JobStatus::Pending => {
                self.status = JobStatus::Processing;
                self.started_at = Some(Utc::now().into());
                self.updated_at = Utc::now().into();
                Ok(self)
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 完成作业
    ///
    /// 将作业置为终态Completed，进度固定为100
    pub fn complete(mut self, total_citations: i32) -> Result<Self, DomainError> {
        match self.status {
            JobStatus::Processing => {
                self.status = JobStatus::Completed;
                self.progress = 100;
                self.total_citations = total_citations;
                self.completed_at = Some(Utc::now().into());
                self.updated_at = Utc::now().into();
                Ok(self)
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 标记作业失败
    ///
    /// 记录错误信息并置为终态Failed；已持久化的部分数据保留
    pub fn fail(mut self, error: String) -> Result<Self, DomainError> {
        match self.status {
            JobStatus::Pending | JobStatus::Processing => {
                self.status = JobStatus::Failed;
                self.error_message = Some(error);
                self.completed_at = Some(Utc::now().into());
                self.updated_at = Utc::now().into();
                Ok(self)
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 判断作业是否处于终态
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, JobStatus::Completed | JobStatus::Failed)
    }
}
