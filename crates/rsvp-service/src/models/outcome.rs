/// 兑换流程的步骤
///
/// 校验 -> 查重 -> 校验邀请码 -> 扣减容量 -> 提交登记，任一步失败即终止。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedemptionStep {
    Validating,
    CheckingDuplicate,
    CheckingCode,
    Decrementing,
    Committing,
}

impl RedemptionStep {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::CheckingDuplicate => "checking_duplicate",
            Self::CheckingCode => "checking_code",
            Self::Decrementing => "decrementing",
            Self::Committing => "committing",
        }
    }
}

/// 兑换结果
///
/// 唯一的成功路径和五种终止路径，HTTP 层据此渲染提示。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedemptionOutcome {
    Success,
    /// 该邮箱已登记，未做任何修改
    AlreadyRegistered,
    /// 邀请码不存在，未做任何修改
    InvalidCode,
    /// 邀请码容量已用尽
    CodeExhausted,
    /// 输入校验失败，每条违反的规则一条消息
    ValidationFailed(Vec<String>),
    /// 存储故障，详细信息只记录在服务端日志
    StoreError,
}

impl RedemptionOutcome {
    /// 指标与日志使用的标签
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::AlreadyRegistered => "already_registered",
            Self::InvalidCode => "invalid_code",
            Self::CodeExhausted => "code_exhausted",
            Self::ValidationFailed(_) => "validation_failed",
            Self::StoreError => "store_error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}
