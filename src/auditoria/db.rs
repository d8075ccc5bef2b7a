use rusqlite::{params, Connection};
use std::env;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use chrono::Utc;

// Cliente Postgres para o banco hospedado
use postgres::{Client, NoTls};

use crate::models::EventoAuditoria;

/// Abstração simples para a conexão de auditoria, que pode ser SQLite local
/// ou o Postgres hospedado. Para Postgres guardamos a URL e executamos as
/// operações em um thread separado, para não tentar subir um runtime tokio
/// dentro do runtime existente.
pub enum AuditoriaConn {
    Sqlite(Connection),
    /// Contém a URL completa (postgres://...)
    PostgresConfig(String),
}

impl fmt::Debug for AuditoriaConn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditoriaConn::Sqlite(_) => write!(f, "AuditoriaConn::Sqlite(..)"),
            AuditoriaConn::PostgresConfig(_) => write!(f, "AuditoriaConn::PostgresConfig(..)"),
        }
    }
}

fn load_dotenv() {
    let _ = dotenv::dotenv();
}

/// Caminho do banco de auditoria local. Honra AUDITORIA_DB_PATH /
/// AUDITORIA_DB_URL (esquemas sqlite:// e file://); URLs remotas não têm
/// caminho local e caem no padrão.
pub fn auditoria_db_path() -> PathBuf {
    load_dotenv();
    if let Ok(p) = env::var("AUDITORIA_DB_PATH") {
        PathBuf::from(p)
    } else if let Ok(p) = env::var("AUDITORIA_DB_URL") {
        if p.starts_with("sqlite://") {
            PathBuf::from(p.trim_start_matches("sqlite://"))
        } else if p.starts_with("file://") {
            PathBuf::from(p.trim_start_matches("file://"))
        } else {
            PathBuf::from("auditoria/auditoria.db")
        }
    } else {
        PathBuf::from("auditoria/auditoria.db")
    }
}

/// Abre a conexão de auditoria aceitando sqlite://, file:// e postgres://.
pub fn abrir_conexao() -> Result<AuditoriaConn, Box<dyn Error>> {
    load_dotenv();
    if let Ok(url) = env::var("AUDITORIA_DB_URL") {
        if url.starts_with("sqlite://") {
            let conn = Connection::open(url.trim_start_matches("sqlite://"))?;
            return Ok(AuditoriaConn::Sqlite(conn));
        } else if url.starts_with("file://") {
            let conn = Connection::open(url.trim_start_matches("file://"))?;
            return Ok(AuditoriaConn::Sqlite(conn));
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            // Para Postgres só guardamos a URL; a conexão de verdade acontece
            // no ponto de uso, dentro de um thread dedicado.
            return Ok(AuditoriaConn::PostgresConfig(url));
        } else {
            return Err(format!("AUDITORIA_DB_URL usa esquema não suportado: {}", url).into());
        }
    }

    let conn = Connection::open(auditoria_db_path())?;
    Ok(AuditoriaConn::Sqlite(conn))
}

const SQL_CRIAR_SQLITE: &str = "CREATE TABLE IF NOT EXISTS eventos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ts TEXT NOT NULL,
    autor TEXT,
    entidade TEXT NOT NULL,
    entidade_id INTEGER NOT NULL,
    acao TEXT NOT NULL,
    dados_antes TEXT,
    dados_depois TEXT
)";

const SQL_CRIAR_POSTGRES: &str = "CREATE TABLE IF NOT EXISTS eventos (
    id BIGSERIAL PRIMARY KEY,
    ts TEXT NOT NULL,
    autor TEXT,
    entidade TEXT NOT NULL,
    entidade_id BIGINT NOT NULL,
    acao TEXT NOT NULL,
    dados_antes TEXT,
    dados_depois TEXT
)";

/// Garante diretório, arquivo e tabela do log de auditoria.
pub fn init_db() -> Result<(), Box<dyn Error>> {
    load_dotenv();
    let db_path = auditoria_db_path();
    if env::var("AUDITORIA_DB_PATH").is_ok()
        || env::var("AUDITORIA_DB_URL")
            .map(|u| u.starts_with("sqlite://") || u.starts_with("file://"))
            .unwrap_or(true)
    {
        if let Some(dir) = db_path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
    }

    match abrir_conexao() {
        Ok(AuditoriaConn::Sqlite(conn)) => {
            conn.execute(SQL_CRIAR_SQLITE, [])?;
            Ok(())
        }
        Ok(AuditoriaConn::PostgresConfig(url)) => {
            let handle = std::thread::spawn(move || -> Result<(), Box<dyn Error + Send + 'static>> {
                let mut client = Client::connect(&url, NoTls)
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                client
                    .batch_execute(SQL_CRIAR_POSTGRES)
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                Ok(())
            });
            match handle.join() {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e as Box<dyn Error>),
                Err(e) => Err(format!("thread join error: {:?}", e).into()),
            }
        }
        Err(e) => Err(e),
    }
}

/// Registra um evento de auditoria. Abre uma conexão de vida curta; o
/// chamador decide o que fazer com a falha (os handlers apenas avisam no
/// stderr e seguem com a resposta).
pub fn registrar_evento(
    autor: Option<&str>,
    entidade: &str,
    entidade_id: i64,
    acao: &str,
    dados_antes: Option<&str>,
    dados_depois: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let ts = Utc::now().to_rfc3339();
    match abrir_conexao()? {
        AuditoriaConn::Sqlite(conn) => {
            conn.execute(
                "INSERT INTO eventos (ts, autor, entidade, entidade_id, acao, dados_antes, dados_depois)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![ts, autor, entidade, entidade_id, acao, dados_antes, dados_depois],
            )?;
            Ok(())
        }
        AuditoriaConn::PostgresConfig(url) => {
            let autor_s = autor.map(|s| s.to_string());
            let entidade_s = entidade.to_string();
            let acao_s = acao.to_string();
            let antes_s = dados_antes.map(|s| s.to_string());
            let depois_s = dados_depois.map(|s| s.to_string());
            let handle = std::thread::spawn(move || -> Result<(), Box<dyn Error + Send + 'static>> {
                let mut client = Client::connect(&url, NoTls)
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                client
                    .execute(
                        "INSERT INTO eventos (ts, autor, entidade, entidade_id, acao, dados_antes, dados_depois)
                         VALUES ($1, $2, $3, $4, $5, $6, $7)",
                        &[&ts, &autor_s, &entidade_s, &entidade_id, &acao_s, &antes_s, &depois_s],
                    )
                    .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                Ok(())
            });
            match handle.join() {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e as Box<dyn Error>),
                Err(e) => Err(format!("thread join error: {:?}", e).into()),
            }
        }
    }
}

fn row_para_evento(row: &rusqlite::Row<'_>) -> rusqlite::Result<EventoAuditoria> {
    Ok(EventoAuditoria {
        id: row.get(0)?,
        ts: row.get(1)?,
        autor: row.get(2)?,
        entidade: row.get(3)?,
        entidade_id: row.get(4)?,
        acao: row.get(5)?,
        dados_antes: row.get(6)?,
        dados_depois: row.get(7)?,
    })
}

/// Eventos mais recentes primeiro, com filtro opcional por entidade.
pub fn listar_eventos(
    entidade: Option<&str>,
    limite: i64,
) -> Result<Vec<EventoAuditoria>, Box<dyn Error>> {
    match abrir_conexao()? {
        AuditoriaConn::Sqlite(conn) => {
            let mut stmt = conn.prepare(
                "SELECT id, ts, autor, entidade, entidade_id, acao, dados_antes, dados_depois
                 FROM eventos ORDER BY id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limite], row_para_evento)?;
            let mut out = Vec::new();
            for r in rows {
                let ev = r?;
                if let Some(ent) = entidade {
                    if ev.entidade != ent {
                        continue;
                    }
                }
                out.push(ev);
            }
            Ok(out)
        }
        AuditoriaConn::PostgresConfig(url) => {
            let entidade_s = entidade.map(|s| s.to_string());
            let handle = std::thread::spawn(
                move || -> Result<Vec<EventoAuditoria>, Box<dyn Error + Send + 'static>> {
                    let mut client = Client::connect(&url, NoTls)
                        .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                    let rows = client
                        .query(
                            "SELECT id, ts, autor, entidade, entidade_id, acao, dados_antes, dados_depois
                             FROM eventos ORDER BY id DESC LIMIT $1",
                            &[&limite],
                        )
                        .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                    let mut out = Vec::new();
                    for r in rows.iter() {
                        let ev = EventoAuditoria {
                            id: r.get(0),
                            ts: r.get(1),
                            autor: r.get(2),
                            entidade: r.get(3),
                            entidade_id: r.get(4),
                            acao: r.get(5),
                            dados_antes: r.get(6),
                            dados_depois: r.get(7),
                        };
                        if let Some(ref ent) = entidade_s {
                            if &ev.entidade != ent {
                                continue;
                            }
                        }
                        out.push(ev);
                    }
                    Ok(out)
                },
            );
            match handle.join() {
                Ok(res) => res.map_err(|e| e as Box<dyn Error>),
                Err(e) => Err(format!("thread join error: {:?}", e).into()),
            }
        }
    }
}

/// Busca um evento pelo id (para o visualizador de diferenças).
pub fn obter_evento(id: i64) -> Result<Option<EventoAuditoria>, Box<dyn Error>> {
    match abrir_conexao()? {
        AuditoriaConn::Sqlite(conn) => {
            let mut stmt = conn.prepare(
                "SELECT id, ts, autor, entidade, entidade_id, acao, dados_antes, dados_depois
                 FROM eventos WHERE id = ?1",
            )?;
            let mut rows = stmt.query_map(params![id], row_para_evento)?;
            match rows.next() {
                Some(r) => Ok(Some(r?)),
                None => Ok(None),
            }
        }
        AuditoriaConn::PostgresConfig(url) => {
            let handle = std::thread::spawn(
                move || -> Result<Option<EventoAuditoria>, Box<dyn Error + Send + 'static>> {
                    let mut client = Client::connect(&url, NoTls)
                        .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                    let rows = client
                        .query(
                            "SELECT id, ts, autor, entidade, entidade_id, acao, dados_antes, dados_depois
                             FROM eventos WHERE id = $1",
                            &[&id],
                        )
                        .map_err(|e| Box::new(e) as Box<dyn Error + Send + 'static>)?;
                    if let Some(r) = rows.get(0) {
                        Ok(Some(EventoAuditoria {
                            id: r.get(0),
                            ts: r.get(1),
                            autor: r.get(2),
                            entidade: r.get(3),
                            entidade_id: r.get(4),
                            acao: r.get(5),
                            dados_antes: r.get(6),
                            dados_depois: r.get(7),
                        }))
                    } else {
                        Ok(None)
                    }
                },
            );
            match handle.join() {
                Ok(res) => res.map_err(|e| e as Box<dyn Error>),
                Err(e) => Err(format!("thread join error: {:?}", e).into()),
            }
        }
    }
}
