//! 邀请码兑换服务
//!
//! 兑换是一条线性流水线，任一步得到非成功结果即提前返回：
//!
//! 1. 输入校验（不访问存储）
//! 2. 查重：`rsvp` 中已有该邮箱 -> AlreadyRegistered
//! 3. 校验邀请码：`codes` 中不存在 -> InvalidCode
//! 4. 扣减容量：原子地在计数大于 0 时减一，未扣减 -> CodeExhausted
//! 5. 提交登记：仅在邮箱不存在时写入
//!
//! ## 并发控制
//!
//! 服务本身不加锁。扣减和提交都是存储层的单条原子操作，
//! 第 2 步的查重只用于避免无谓的扣减，真正的唯一性由第 5 步保证。
//! 提交时发现邮箱已被并发请求登记，则归还第 4 步扣减的名额。

use std::sync::Arc;
use std::time::Instant;

use rsvp_shared::error::RsvpError;
use rsvp_shared::observability::metrics;
use tracing::{error, info, instrument, warn};

use crate::models::{Mapping, RedemptionOutcome, RedemptionRequest, RedemptionStep, Registration};
use crate::store::RegistrationStore;

/// 某一步的存储故障
struct StepFailure {
    step: RedemptionStep,
    source: RsvpError,
}

fn failed_at(step: RedemptionStep) -> impl FnOnce(RsvpError) -> StepFailure {
    move |source| StepFailure { step, source }
}

/// 兑换服务
pub struct RsvpService {
    store: Arc<dyn RegistrationStore>,
}

impl RsvpService {
    pub fn new(store: Arc<dyn RegistrationStore>) -> Self {
        Self { store }
    }

    /// 兑换邀请码
    ///
    /// 存储故障不会以错误形式返回，统一转换为 `StoreError` 并在服务端记录详情。
    /// 不做自动重试：提交步骤不是幂等的，重试可能重复扣减。
    #[instrument(skip(self, request), fields(email = %request.email, code = %request.code))]
    pub async fn redeem(&self, request: RedemptionRequest) -> RedemptionOutcome {
        let started = Instant::now();

        let outcome = match self.run_pipeline(&request).await {
            Ok(outcome) => outcome,
            Err(StepFailure { step, source }) => {
                error!(
                    step = step.as_str(),
                    error_code = source.code(),
                    retryable = source.is_retryable(),
                    error = %source,
                    "Store failure during redemption"
                );
                RedemptionOutcome::StoreError
            }
        };

        metrics::record_redemption(outcome.label(), started.elapsed().as_secs_f64());
        info!(outcome = outcome.label(), "Redemption finished");

        outcome
    }

    async fn run_pipeline(
        &self,
        request: &RedemptionRequest,
    ) -> Result<RedemptionOutcome, StepFailure> {
        // 1. 输入校验
        let messages = request.validation_messages();
        if !messages.is_empty() {
            return Ok(RedemptionOutcome::ValidationFailed(messages));
        }

        // 2. 查重
        if self
            .store
            .exists(Mapping::Rsvp, &request.email)
            .await
            .map_err(failed_at(RedemptionStep::CheckingDuplicate))?
        {
            return Ok(RedemptionOutcome::AlreadyRegistered);
        }

        // 3. 校验邀请码
        if !self
            .store
            .exists(Mapping::Codes, &request.code)
            .await
            .map_err(failed_at(RedemptionStep::CheckingCode))?
        {
            return Ok(RedemptionOutcome::InvalidCode);
        }

        // 扣减之前完成序列化，避免扣减后才发现无法提交
        let record = Registration::new(request.full_name.clone(), request.code.clone())
            .to_stored()
            .map_err(failed_at(RedemptionStep::Committing))?;

        // 4. 扣减容量
        let remaining = self
            .store
            .decrement_if_positive(Mapping::Codes, &request.code)
            .await
            .map_err(failed_at(RedemptionStep::Decrementing))?;
        if remaining < 0 {
            return Ok(RedemptionOutcome::CodeExhausted);
        }
        metrics::set_code_remaining(&request.code, remaining);

        // 5. 提交登记
        let committed = self
            .store
            .set_field_if_absent(Mapping::Rsvp, &request.email, &record)
            .await
            .map_err(failed_at(RedemptionStep::Committing))?;
        if committed {
            return Ok(RedemptionOutcome::Success);
        }

        // 并发请求已登记同一邮箱，归还名额
        let restored = self
            .store
            .increment(Mapping::Codes, &request.code, 1)
            .await
            .map_err(failed_at(RedemptionStep::Committing))?;
        metrics::set_code_remaining(&request.code, restored);
        warn!(remaining = restored, "Lost commit race, capacity restored");

        Ok(RedemptionOutcome::AlreadyRegistered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockRegistrationStore;

    fn request() -> RedemptionRequest {
        RedemptionRequest::new("Ada Lovelace", "ada@example.com", "RDS")
    }

    fn store_down() -> RsvpError {
        RsvpError::Timeout {
            operation: "HEXISTS".to_string(),
        }
    }

    #[tokio::test]
    async fn test_validation_failure_touches_no_store() {
        // 未设置任何期望，访问存储会直接 panic
        let service = RsvpService::new(Arc::new(MockRegistrationStore::new()));

        let outcome = service
            .redeem(RedemptionRequest::new("", "not-an-email", ""))
            .await;

        match outcome {
            RedemptionOutcome::ValidationFailed(messages) => assert_eq!(messages.len(), 3),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_already_registered_performs_no_mutation() {
        let mut store = MockRegistrationStore::new();
        store
            .expect_exists()
            .withf(|mapping, field| *mapping == Mapping::Rsvp && field == "ada@example.com")
            .times(1)
            .returning(|_, _| Ok(true));
        store.expect_decrement_if_positive().never();
        store.expect_set_field_if_absent().never();
        store.expect_increment().never();

        let service = RsvpService::new(Arc::new(store));
        assert_eq!(service.redeem(request()).await, RedemptionOutcome::AlreadyRegistered);
    }

    #[tokio::test]
    async fn test_unknown_code_performs_no_mutation() {
        let mut store = MockRegistrationStore::new();
        store
            .expect_exists()
            .withf(|mapping, _| *mapping == Mapping::Rsvp)
            .returning(|_, _| Ok(false));
        store
            .expect_exists()
            .withf(|mapping, field| *mapping == Mapping::Codes && field == "rds")
            .returning(|_, _| Ok(false));
        store.expect_decrement_if_positive().never();
        store.expect_set_field_if_absent().never();

        let service = RsvpService::new(Arc::new(store));
        assert_eq!(service.redeem(request()).await, RedemptionOutcome::InvalidCode);
    }

    #[tokio::test]
    async fn test_exhausted_code_is_not_committed() {
        let mut store = MockRegistrationStore::new();
        store
            .expect_exists()
            .returning(|mapping, _| Ok(mapping == Mapping::Codes));
        store
            .expect_decrement_if_positive()
            .times(1)
            .returning(|_, _| Ok(crate::store::NOT_DECREMENTED));
        store.expect_set_field_if_absent().never();
        store.expect_increment().never();

        let service = RsvpService::new(Arc::new(store));
        assert_eq!(service.redeem(request()).await, RedemptionOutcome::CodeExhausted);
    }

    #[tokio::test]
    async fn test_last_unit_is_redeemable() {
        let mut store = MockRegistrationStore::new();
        store
            .expect_exists()
            .returning(|mapping, _| Ok(mapping == Mapping::Codes));
        store
            .expect_decrement_if_positive()
            .times(1)
            .returning(|_, _| Ok(0));
        store
            .expect_set_field_if_absent()
            .withf(|mapping, field, value| {
                *mapping == Mapping::Rsvp
                    && field == "ada@example.com"
                    && value == r#"{"name":"Ada Lovelace","code":"rds"}"#
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        let service = RsvpService::new(Arc::new(store));
        assert_eq!(service.redeem(request()).await, RedemptionOutcome::Success);
    }

    #[tokio::test]
    async fn test_store_failure_short_circuits() {
        let mut store = MockRegistrationStore::new();
        store
            .expect_exists()
            .times(1)
            .returning(|_, _| Err(store_down()));
        store.expect_decrement_if_positive().never();
        store.expect_set_field_if_absent().never();

        let service = RsvpService::new(Arc::new(store));
        assert_eq!(service.redeem(request()).await, RedemptionOutcome::StoreError);
    }

    #[tokio::test]
    async fn test_decrement_failure_is_store_error() {
        let mut store = MockRegistrationStore::new();
        store
            .expect_exists()
            .returning(|mapping, _| Ok(mapping == Mapping::Codes));
        store
            .expect_decrement_if_positive()
            .returning(|_, _| Err(store_down()));
        store.expect_set_field_if_absent().never();

        let service = RsvpService::new(Arc::new(store));
        assert_eq!(service.redeem(request()).await, RedemptionOutcome::StoreError);
    }

    #[tokio::test]
    async fn test_commit_failure_does_not_restore_unit() {
        let mut store = MockRegistrationStore::new();
        store
            .expect_exists()
            .returning(|mapping, _| Ok(mapping == Mapping::Codes));
        store
            .expect_decrement_if_positive()
            .returning(|_, _| Ok(4));
        store
            .expect_set_field_if_absent()
            .returning(|_, _, _| Err(store_down()));
        store.expect_increment().never();

        let service = RsvpService::new(Arc::new(store));
        assert_eq!(service.redeem(request()).await, RedemptionOutcome::StoreError);
    }

    #[tokio::test]
    async fn test_lost_commit_race_restores_unit() {
        let mut store = MockRegistrationStore::new();
        store
            .expect_exists()
            .returning(|mapping, _| Ok(mapping == Mapping::Codes));
        store
            .expect_decrement_if_positive()
            .returning(|_, _| Ok(2));
        store
            .expect_set_field_if_absent()
            .returning(|_, _, _| Ok(false));
        store
            .expect_increment()
            .withf(|mapping, field, delta| *mapping == Mapping::Codes && field == "rds" && *delta == 1)
            .times(1)
            .returning(|_, _, _| Ok(3));

        let service = RsvpService::new(Arc::new(store));
        assert_eq!(service.redeem(request()).await, RedemptionOutcome::AlreadyRegistered);
    }

    #[tokio::test]
    async fn test_failed_restore_is_store_error() {
        let mut store = MockRegistrationStore::new();
        store
            .expect_exists()
            .returning(|mapping, _| Ok(mapping == Mapping::Codes));
        store
            .expect_decrement_if_positive()
            .returning(|_, _| Ok(0));
        store
            .expect_set_field_if_absent()
            .returning(|_, _, _| Ok(false));
        store
            .expect_increment()
            .returning(|_, _, _| Err(store_down()));

        let service = RsvpService::new(Arc::new(store));
        assert_eq!(service.redeem(request()).await, RedemptionOutcome::StoreError);
    }
}
