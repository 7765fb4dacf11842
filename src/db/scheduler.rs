use super::DBClient;
use tokio_cron_scheduler::{Job, JobScheduler};

impl DBClient {
    /// Prunes popup statistics older than a year, once per night.
    pub async fn start_stats_retention_task(&self) {
        let sched = match JobScheduler::new().await {
            Ok(sched) => sched,
            Err(e) => {
                tracing::error!("failed to create job scheduler: {:?}", e);
                return;
            }
        };
        let pool = self.pool.clone();

        let job = Job::new_async("0 0 1 * * *", move |uuid, _l| {
            let pool = pool.clone();
            Box::pin(async move {
                tracing::info!("running stats retention job {:?}", uuid);

                let result =
                    sqlx::query("DELETE FROM popup_stats WHERE date < NOW() - INTERVAL '365 days'")
                        .execute(&pool)
                        .await;

                match result {
                    Ok(r) => {
                        tracing::info!(
                            "stats retention job {:?} finished, deleted {} rows",
                            uuid,
                            r.rows_affected()
                        );
                    }
                    Err(e) => {
                        tracing::error!("stats retention job {:?} failed: {:?}", uuid, e);
                    }
                }
            })
        });

        let job = match job {
            Ok(job) => job,
            Err(e) => {
                tracing::error!("failed to create stats retention job: {:?}", e);
                return;
            }
        };

        if let Err(e) = sched.add(job).await {
            tracing::error!("failed to schedule stats retention job: {:?}", e);
            return;
        }
        //It doesn't block.
        if let Err(e) = sched.start().await {
            tracing::error!("failed to start job scheduler: {:?}", e);
        }
    }
}
