//! PostgreSQL implementation of [`SearchStore`].

use async_trait::async_trait;
use corpsearch_query::escape_like;
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::{Executor, PgConnection, PgPool, Postgres};
use std::future::Future;
use std::time::{Duration, Instant};

use crate::config::DatabaseConfig;
use crate::db::search::{BindValue, QueryBuilder, SearchQuery};
use crate::db::traits::{PoolStatus, SearchStore};
use crate::metrics::{DB_QUERY_DURATION_SECONDS, DB_QUERY_ERRORS_TOTAL};
use crate::models::{
    Address, CorpName, CorpParty, Corporation, CorporationRow, CorporationSummary, FilingView,
    Office, OfficeHeld, PartyRow, PartySummary, RelatedParty, ResultPage, StateView,
};
use crate::Result;

#[derive(Clone)]
pub struct PostgresSearchStore {
    pool: PgPool,
}

impl PostgresSearchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a lazily connecting pool. Connection failures surface on first
    /// use, so the service can start and report itself unhealthy.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self> {
        let statement_timeout_ms = config.statement_timeout_seconds * 1000;
        let pool = PgPoolOptions::new()
            .min_connections(config.pool_min_size)
            .max_connections(config.pool_max_size)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    if statement_timeout_ms > 0 {
                        conn.execute(
                            format!("SET statement_timeout = {statement_timeout_ms}").as_str(),
                        )
                        .await?;
                    }
                    Ok(())
                })
            })
            .connect_lazy(&config.url)?;
        Ok(Self::new(pool))
    }

    async fn execute_search<R>(
        &self,
        conn: &mut PgConnection,
        query: &QueryBuilder<'_>,
    ) -> Result<Vec<R>>
    where
        R: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let (sql, bind_values) = query.build_sql();
        tracing::trace!(sql = %sql, binds = ?bind_values, "search query");

        let mut query_as = sqlx::query_as::<_, R>(&sql);
        for value in bind_values {
            query_as = match value {
                BindValue::Text(v) => query_as.bind(v),
                BindValue::Int(v) => query_as.bind(v),
            };
        }

        observe("search_page", query_as.fetch_all(&mut *conn)).await
    }

    async fn count_total(&self, conn: &mut PgConnection, query: &QueryBuilder<'_>) -> Result<i64> {
        let (sql, bind_values) = query.build_count_sql();
        tracing::trace!(sql = %sql, "count query");

        let mut query_scalar = sqlx::query_scalar::<_, i64>(&sql);
        for value in bind_values {
            query_scalar = match value {
                BindValue::Text(v) => query_scalar.bind(v),
                BindValue::Int(v) => query_scalar.bind(v),
            };
        }

        observe("search_count", query_scalar.fetch_one(&mut *conn)).await
    }

    async fn run_search<R, T>(&self, query: &SearchQuery) -> Result<ResultPage<T>>
    where
        R: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
        T: From<R>,
    {
        let builder = query.query_builder();
        let mut conn = self.pool.acquire().await?;
        let rows: Vec<R> = self.execute_search(&mut conn, &builder).await?;
        let total = self.count_total(&mut conn, &builder).await?;

        Ok(ResultPage {
            results: rows.into_iter().map(T::from).collect(),
            total,
            page: query.page,
            page_size: query.page_size,
        })
    }
}

/// Record duration and failures of one database round trip.
async fn observe<T>(
    query_type: &'static str,
    fut: impl Future<Output = std::result::Result<T, sqlx::Error>>,
) -> Result<T> {
    let start = Instant::now();
    let result = fut.await;
    DB_QUERY_DURATION_SECONDS
        .with_label_values(&[query_type])
        .observe(start.elapsed().as_secs_f64());
    if let Err(e) = &result {
        DB_QUERY_ERRORS_TOTAL
            .with_label_values(&[query_type, error_kind(e)])
            .inc();
    }
    Ok(result?)
}

fn error_kind(e: &sqlx::Error) -> &'static str {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => "pool",
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => "connection",
        sqlx::Error::Database(_) => "database",
        sqlx::Error::RowNotFound => "not_found",
        _ => "other",
    }
}

const RELATED_PARTY_SELECT: &str = "SELECT cp.corp_party_id, cp.first_nme, cp.middle_nme, \
     cp.last_nme, cp.corp_num, cp.party_typ_cd, cp.appointment_dt, cp.cessation_dt, \
     e.event_timestmp \
     FROM corp_party cp \
     LEFT JOIN event e ON e.event_id = cp.start_event_id";

type PgQueryAs<'q, T> = sqlx::query::QueryAs<'q, Postgres, T, PgArguments>;

fn by_corp_num<'q, T>(sql: &'q str, corp_num: &'q str) -> PgQueryAs<'q, T>
where
    T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
{
    sqlx::query_as::<_, T>(sql).bind(corp_num)
}

#[async_trait]
impl SearchStore for PostgresSearchStore {
    async fn search_corporations(
        &self,
        query: &SearchQuery,
    ) -> Result<ResultPage<CorporationSummary>> {
        self.run_search::<CorporationRow, CorporationSummary>(query)
            .await
    }

    async fn search_parties(&self, query: &SearchQuery) -> Result<ResultPage<PartySummary>> {
        self.run_search::<PartyRow, PartySummary>(query).await
    }

    async fn corporation(&self, corp_num: &str) -> Result<Option<Corporation>> {
        let q = by_corp_num::<Corporation>(
            "SELECT corp_num, corp_typ_cd, recognition_dts, last_ar_filed_dt, transition_dt, \
             bn_9, bn_15, admin_email FROM corporation WHERE corp_num = $1",
            corp_num,
        );
        observe("corporation", q.fetch_optional(&self.pool)).await
    }

    async fn corp_names(&self, corp_num: &str) -> Result<Vec<CorpName>> {
        let q = by_corp_num::<CorpName>(
            "SELECT corp_num, corp_name_seq_num, corp_name_typ_cd, start_event_id, end_event_id, \
             srch_nme, corp_nme FROM corp_name WHERE corp_num = $1 \
             ORDER BY end_event_id DESC NULLS FIRST, corp_name_seq_num",
            corp_num,
        );
        observe("corp_names", q.fetch_all(&self.pool)).await
    }

    async fn corp_state(&self, corp_num: &str) -> Result<Option<StateView>> {
        let q = by_corp_num::<StateView>(
            "SELECT cs.state_typ_cd, cos.op_state_typ_cd, cos.short_desc, cos.full_desc \
             FROM corp_state cs \
             LEFT JOIN corp_op_state cos ON cos.state_typ_cd = cs.state_typ_cd \
             WHERE cs.corp_num = $1 AND cs.end_event_id IS NULL \
             ORDER BY cs.start_event_id DESC NULLS LAST LIMIT 1",
            corp_num,
        );
        observe("corp_state", q.fetch_optional(&self.pool)).await
    }

    async fn offices(&self, corp_num: &str) -> Result<Vec<Office>> {
        let q = by_corp_num::<Office>(
            "SELECT corp_num, office_typ_cd, start_event_id, end_event_id, mailing_addr_id, \
             delivery_addr_id FROM office WHERE corp_num = $1 AND end_event_id IS NULL \
             ORDER BY office_typ_cd",
            corp_num,
        );
        observe("offices", q.fetch_all(&self.pool)).await
    }

    async fn address(&self, addr_id: i32) -> Result<Option<Address>> {
        let q = sqlx::query_as::<_, Address>(
            "SELECT addr_id, province, country_typ_cd, postal_cd, addr_line_1, addr_line_2, \
             addr_line_3, city FROM address WHERE addr_id = $1",
        )
        .bind(addr_id);
        observe("address", q.fetch_optional(&self.pool)).await
    }

    async fn corp_party(&self, corp_party_id: i32) -> Result<Option<CorpParty>> {
        let q = sqlx::query_as::<_, CorpParty>(
            "SELECT corp_party_id, mailing_addr_id, delivery_addr_id, corp_num, party_typ_cd, \
             start_event_id, end_event_id, appointment_dt, cessation_dt, last_nme, middle_nme, \
             first_nme, business_nme, bus_company_num, email_address \
             FROM corp_party WHERE corp_party_id = $1",
        )
        .bind(corp_party_id);
        observe("corp_party", q.fetch_optional(&self.pool)).await
    }

    async fn offices_held(&self, corp_party_id: i32) -> Result<Vec<OfficeHeld>> {
        let q = sqlx::query_as::<_, OfficeHeld>(
            "SELECT cp.corp_party_id, oh.officer_typ_cd, ot.short_desc, cp.appointment_dt, \
             e.event_timestmp, a.addr_line_1 \
             FROM offices_held oh \
             JOIN corp_party cp ON cp.corp_party_id = oh.corp_party_id \
             LEFT JOIN officer_type ot ON ot.officer_typ_cd = oh.officer_typ_cd \
             LEFT JOIN event e ON e.event_id = cp.start_event_id \
             LEFT JOIN address a ON a.addr_id = cp.mailing_addr_id \
             WHERE oh.corp_party_id = $1 ORDER BY oh.officer_typ_cd",
        )
        .bind(corp_party_id);
        observe("offices_held", q.fetch_all(&self.pool)).await
    }

    async fn parties_at_addresses(
        &self,
        mailing_addr_id: Option<i32>,
        delivery_addr_id: Option<i32>,
    ) -> Result<Vec<RelatedParty>> {
        let sql = format!(
            "{RELATED_PARTY_SELECT} \
             WHERE cp.mailing_addr_id = $1 OR cp.delivery_addr_id = $2 \
             ORDER BY cp.corp_party_id"
        );
        let q = sqlx::query_as::<_, RelatedParty>(&sql)
            .bind(mailing_addr_id)
            .bind(delivery_addr_id);
        observe("parties_at_addresses", q.fetch_all(&self.pool)).await
    }

    async fn parties_with_name(
        &self,
        first_nme: Option<&str>,
        last_nme: Option<&str>,
        corp_num: Option<&str>,
    ) -> Result<Vec<RelatedParty>> {
        let sql = format!(
            "{RELATED_PARTY_SELECT} \
             WHERE ($1::text IS NULL OR cp.first_nme ILIKE $1 ESCAPE '\\') \
             AND ($2::text IS NULL OR cp.last_nme ILIKE $2 ESCAPE '\\') \
             AND ($3::text IS NULL OR cp.corp_num ILIKE $3 ESCAPE '\\') \
             ORDER BY cp.corp_party_id"
        );
        let q = sqlx::query_as::<_, RelatedParty>(&sql)
            .bind(first_nme.map(escape_like))
            .bind(last_nme.map(escape_like))
            .bind(corp_num.map(escape_like));
        observe("parties_with_name", q.fetch_all(&self.pool)).await
    }

    async fn party_filings(&self, corp_party_id: i32) -> Result<Vec<FilingView>> {
        let q = sqlx::query_as::<_, FilingView>(
            "SELECT f.event_id, e.event_timestmp, f.filing_typ_cd, ft.full_desc, f.effective_dt \
             FROM corp_party cp \
             JOIN event e ON e.event_id = cp.start_event_id \
             JOIN filing f ON f.event_id = e.event_id \
             LEFT JOIN filing_type ft ON ft.filing_typ_cd = f.filing_typ_cd \
             WHERE cp.corp_party_id = $1 ORDER BY f.filing_typ_cd",
        )
        .bind(corp_party_id);
        observe("party_filings", q.fetch_all(&self.pool)).await
    }

    async fn ping(&self) -> Result<()> {
        let q = sqlx::query_scalar::<_, i32>("SELECT 1 FROM corp_party LIMIT 1");
        observe("ping", q.fetch_optional(&self.pool)).await?;
        Ok(())
    }

    fn pool_status(&self) -> Option<PoolStatus> {
        Some(PoolStatus {
            size: self.pool.size(),
            idle: self.pool.num_idle(),
        })
    }
}
