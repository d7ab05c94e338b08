// ==========================================
// 夜市摊位库存系统 - 计划日上下文解析
// ==========================================
// 职责: 确定计划日期与当日情境（星期/天气/节假日/本地活动）
// 红线: 演示模式与真实模式互斥, 从不混用
// 输入: Clock（当前日期） + ContextSource（演示覆写行 + 日历事件）
// 输出: TodayContext
// ==========================================

use crate::domain::context::{CalendarEvent, DemoOverride, TodayContext};
use crate::domain::types::{EventType, WeatherKey};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

// ==========================================
// Clock - 当前日期来源
// ==========================================
pub trait Clock: Send + Sync {
    /// 当前本地日期（无时刻）
    fn today(&self) -> NaiveDate;
}

/// 系统时钟（本地时区）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// 固定日期时钟（测试 / 回放）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

// ==========================================
// ContextSource Trait
// ==========================================
// 实现者: ContextRepository（demo_context / events 表）
#[async_trait]
pub trait ContextSource: Send + Sync {
    /// 读取演示覆写行（至多一行）
    async fn find_demo_override(&self) -> RepositoryResult<Option<DemoOverride>>;

    /// 读取指定日期的日历事件
    async fn find_events_on(&self, date: NaiveDate) -> RepositoryResult<Vec<CalendarEvent>>;
}

// ==========================================
// ContextResolver
// ==========================================
pub struct ContextResolver {
    source: Arc<dyn ContextSource>,
    clock: Arc<dyn Clock>,
}

impl ContextResolver {
    pub fn new(source: Arc<dyn ContextSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    /// 解析计划日上下文
    ///
    /// # 规则
    /// 1. 演示覆写启用且有日期 → 完全由覆写行构造（跳过事件查询）
    /// 2. 否则取时钟当天, 查询当天事件:
    ///    - 任一 public_holiday → is_public_holiday
    ///    - 第一个 local_event → has_local_event + 标签
    /// 3. 读取失败只记 warn, 不向上传播
    #[instrument(skip(self))]
    pub async fn resolve(&self) -> TodayContext {
        let demo = match self.source.find_demo_override().await {
            Ok(demo) => demo,
            Err(e) => {
                warn!(error = %e, "读取演示覆写失败, 使用真实日期");
                None
            }
        };

        if let Some(ctx) = demo.as_ref().and_then(Self::from_demo) {
            debug!(date = %ctx.date_iso, "演示模式生效");
            return ctx;
        }

        let today = self.clock.today();
        let events = match self.source.find_events_on(today).await {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, date = %today, "读取日历事件失败, 按普通日处理");
                Vec::new()
            }
        };

        Self::from_events(today, &events)
    }

    /// 由演示覆写构造上下文（未启用或无日期时返回 None）
    pub fn from_demo(demo: &DemoOverride) -> Option<TodayContext> {
        let date = demo.active_date()?;
        let label = demo
            .local_event_label
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Some(TodayContext::new(
            date,
            demo.weather.unwrap_or(WeatherKey::Clear),
            demo.is_public_holiday,
            label.is_some(),
            label,
        ))
    }

    /// 由真实日期与当天事件构造上下文（天气固定为晴）
    pub fn from_events(date: NaiveDate, events: &[CalendarEvent]) -> TodayContext {
        let is_public_holiday = events
            .iter()
            .any(|ev| ev.event_type == EventType::PublicHoliday);

        let local_event = events
            .iter()
            .find(|ev| ev.event_type == EventType::LocalEvent);

        TodayContext::new(
            date,
            WeatherKey::Clear,
            is_public_holiday,
            local_event.is_some(),
            local_event.and_then(|ev| ev.label.clone()),
        )
    }
}
