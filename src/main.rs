use anyhow::Context;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use agri_domain::{CropType, InMemorySessionStore};
use agri_providers::{AdviceSource, AdvisoryService, Language, NominatimGeocoder, ProviderConfig, ReverseGeocoder};
use agri_workflow::certificate::NOT_PROVIDED;
use agri_workflow::{BlockReason, CompletionOutcome, EvidenceUpload, HtmlCertificateRenderer, IdentityHandoff, StepStatus,
                    TrainingFlow, TrainingSessionFactory, WorkflowConfig};
use flow::stubs::{InMemoryArtifactStore, InMemoryFlowRepository};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Menú interactivo de la capacitación por cultivo.
///
/// Uso: `kisan-cli [URL o query de hand-off]`, por ejemplo
/// `kisan-cli "name=Asha&nationalId=123456789012&cropType=potato"`.
/// Sin `AGRI_DB_URL`/`DATABASE_URL` la sesión vive solo en memoria.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
                             .init();

    let factory = match TrainingSessionFactory::from_env() {
        Ok(f) => f,
        Err(e) => {
            warn!("sin base SQLite ({}); la sesión vive en memoria", e);
            TrainingSessionFactory::new(Arc::new(InMemoryFlowRepository::new()),
                                        Arc::new(InMemoryArtifactStore::new()),
                                        Arc::new(InMemorySessionStore::new()),
                                        WorkflowConfig::from_env())
        }
    };

    let handoff = match std::env::args().nth(1) {
        Some(arg) if arg.contains("://") => IdentityHandoff::from_url(&arg)?,
        Some(arg) => IdentityHandoff::from_query(&arg),
        None => IdentityHandoff::new(),
    };
    let (mut session, outcome) = factory.start_session(&handoff)?;
    info!("sesión {} (identidad desde {:?})", session.id, outcome.source);

    let providers = ProviderConfig::from_env();
    let advisory = AdvisoryService::from_config(&providers);
    let geocoder = match NominatimGeocoder::new(&providers) {
        Ok(g) => Some(g),
        Err(e) => {
            warn!("geocodificación no disponible: {}", e);
            None
        }
    };

    loop {
        println!("\n== Capacitación agrícola ==");
        println!("1) Ver perfil y progreso");
        println!("2) Editar perfil");
        println!("3) Seleccionar cultivo");
        println!("4) Marcar/desmarcar casilla del paso actual");
        println!("5) Adjuntar evidencia (ruta de imagen)");
        println!("6) Completar paso actual");
        println!("7) Cronograma");
        println!("8) Esquemas elegibles");
        println!("9) Generar certificado");
        println!("10) Preguntar al asesor");
        println!("11) Ubicación desde coordenadas");
        println!("12) Listar sesiones");
        println!("13) Cargar sesión");
        println!("0) Guardar y salir");
        let choice = prompt("Elige una opción: ")?;
        let result = match choice.trim() {
            "1" => {
                show_status(&session);
                Ok(())
            }
            "2" => edit_profile(&mut session),
            "3" => select_crop(&mut session),
            "4" => toggle_item(&mut session),
            "5" => attach_evidence(&mut session),
            "6" => complete_step(&mut session),
            "7" => {
                show_timeline(&session);
                Ok(())
            }
            "8" => {
                show_schemes(&session);
                Ok(())
            }
            "9" => write_certificate(&mut session),
            "10" => ask_advisor(&advisory).await,
            "11" => match &geocoder {
                Some(g) => locate(&mut session, g).await,
                None => {
                    println!("Geocodificación no disponible");
                    Ok(())
                }
            },
            "12" => list_sessions(&factory),
            "13" => match load_session(&factory) {
                Ok(Some(loaded)) => {
                    session = loaded;
                    println!("Sesión cargada: {}", session.id);
                    Ok(())
                }
                Ok(None) => Ok(()),
                Err(e) => Err(e),
            },
            "0" => {
                session.save()?;
                println!("Sesión {} guardada. Saliendo...", session.id);
                break;
            }
            other => {
                println!("Opción inválida: {}", other);
                Ok(())
            }
        };
        if let Err(e) = result {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() { NOT_PROVIDED } else { value }
}

fn show_status(session: &TrainingFlow) {
    let p = session.profile();
    println!("\nSesión: {}", session.id);
    println!("Nombre: {}", or_placeholder(p.name()));
    println!("Identificador: {}", if p.national_id().is_empty() { NOT_PROVIDED.to_string() } else { p.masked_national_id() });
    println!("Móvil: {}", or_placeholder(p.mobile()));
    println!("Superficie: {} acres", p.land_area_acres());
    println!("Ubicación: {}", or_placeholder(p.location()));
    println!("Cuenta bancaria: {}", or_placeholder(p.bank_account_ref()));
    let locked: Vec<String> = p.locked_fields().map(|f| f.to_string()).collect();
    if !locked.is_empty() {
        println!("Solo lectura: {}", locked.join(", "));
    }
    match session.selected_crop() {
        Some(crop) => println!("Cultivo: {}", crop),
        None => println!("Cultivo: (sin seleccionar)"),
    }
    let days = session.days_progress();
    println!("Avance: {}% ({} de {} días)", session.completion_percentage(), days.completed_days, days.total_days);
    if let (Some(step), Some(gate)) = (session.current_step(), session.gate_status()) {
        println!("Paso actual: {} ({})", step.title, step.id);
        let progress = session.step_progress(step.id);
        for (i, item) in step.checklist.iter().enumerate() {
            let checked = progress.and_then(|p| p.checked.get(i).copied()).unwrap_or(false);
            println!("  [{}] {}. {}", if checked { "x" } else { " " }, i + 1, item);
        }
        println!("  Evidencia: {}", if gate.has_evidence { "adjunta" } else { "pendiente" });
        println!("  Prueba requerida: {}", step.proof_requirement);
    }
    if let Some(cert) = session.certificate() {
        println!("Certificado: {} (válido hasta {})", cert.certificate_id, cert.valid_until.format("%d/%m/%Y"));
    }
}

fn edit_profile(session: &mut TrainingFlow) -> anyhow::Result<()> {
    println!("a) Nombre  b) Identificador  c) Móvil  d) Superficie (acres)  e) Ubicación  f) Cuenta bancaria  g) Foto");
    let field = prompt("Campo: ")?;
    let field = field.trim().to_lowercase();
    if field == "g" {
        let path = prompt("Ruta de la foto: ")?;
        let upload = read_upload(path.trim())?;
        let key = session.set_profile_photo(upload)?;
        session.save()?;
        println!("Foto guardada ({})", key);
        return Ok(());
    }
    let value = prompt("Valor: ")?;
    let value = value.trim().to_string();
    match field.as_str() {
        "a" => session.edit_profile(|p| p.set_name(value))?,
        "b" => session.edit_profile(|p| p.set_national_id(value))?,
        "c" => session.edit_profile(|p| p.set_mobile(value))?,
        "d" => {
            let acres: f64 = value.parse().with_context(|| format!("superficie no numérica: {}", value))?;
            session.edit_profile(|p| p.set_land_area_acres(acres))?
        }
        "e" => session.edit_profile(|p| p.set_location(value))?,
        "f" => session.edit_profile(|p| p.set_bank_account_ref(value))?,
        other => {
            println!("Campo inválido: {}", other);
            return Ok(());
        }
    }
    session.save()?;
    println!("Perfil actualizado");
    Ok(())
}

fn select_crop(session: &mut TrainingFlow) -> anyhow::Result<()> {
    for (i, crop) in CropType::ALL.iter().enumerate() {
        println!("{}) {} ({} pasos, {} días)", i + 1, crop, crop.steps().len(), crop.total_days());
    }
    let s = prompt("Cultivo (número o nombre): ")?;
    let crop = match s.trim().parse::<usize>() {
        Ok(n) if (1..=CropType::ALL.len()).contains(&n) => CropType::ALL[n - 1],
        _ => s.parse::<CropType>()?,
    };
    let before = session.id;
    session.select_crop(crop)?;
    if session.id != before {
        println!("Nueva corrida {} (la anterior {} quedó abandonada)", session.id, before);
    }
    println!("Cultivo seleccionado: {}", crop);
    Ok(())
}

fn toggle_item(session: &mut TrainingFlow) -> anyhow::Result<()> {
    let Some(step) = session.current_step() else {
        println!("No hay paso actual");
        return Ok(());
    };
    let s = prompt(&format!("Casilla (1-{}): ", step.checklist.len()))?;
    let index = match s.trim().parse::<usize>() {
        Ok(n) if n >= 1 => n - 1,
        _ => {
            println!("Número inválido");
            return Ok(());
        }
    };
    let checked = session.step_progress(step.id).and_then(|p| p.checked.get(index).copied()).unwrap_or(false);
    session.toggle_checklist_item(step.id, index, !checked)?;
    println!("Casilla {} {}", index + 1, if checked { "desmarcada" } else { "marcada" });
    Ok(())
}

fn guess_media_type(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

fn read_upload(path: &str) -> anyhow::Result<EvidenceUpload> {
    let path = Path::new(path);
    let bytes = std::fs::read(path).with_context(|| format!("no se pudo leer {}", path.display()))?;
    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("evidence").to_string();
    Ok(EvidenceUpload::new(filename, guess_media_type(path), bytes))
}

fn attach_evidence(session: &mut TrainingFlow) -> anyhow::Result<()> {
    let Some(step) = session.current_step() else {
        println!("No hay paso actual");
        return Ok(());
    };
    let path = prompt("Ruta de la imagen: ")?;
    let mut upload = read_upload(path.trim())?;
    upload.captured_at = Some(chrono::Utc::now());
    match session.attach_evidence(step.id, upload)? {
        Some(ev) => println!("Evidencia adjunta: {} ({} bytes)", ev.filename, ev.file_size_bytes),
        None => println!("El paso ya estaba completado; evidencia ignorada"),
    }
    Ok(())
}

fn complete_step(session: &mut TrainingFlow) -> anyhow::Result<()> {
    match session.complete_current_step()? {
        CompletionOutcome::Advanced { step_id, next_step_index } => {
            println!("Paso {} completado. Siguiente: paso {}", step_id, next_step_index + 1);
        }
        CompletionOutcome::Finished { step_id } => {
            println!("Paso {} completado. ¡Capacitación terminada! Ya puede generar el certificado.", step_id);
        }
        CompletionOutcome::Blocked(BlockReason::NoCropSelected) => println!("Primero seleccione un cultivo"),
        CompletionOutcome::Blocked(BlockReason::TrainingFinished) => println!("La capacitación ya está completa"),
        CompletionOutcome::Blocked(BlockReason::Gate(gate)) => {
            let missing: Vec<String> = gate.missing_items.iter().map(|i| (i + 1).to_string()).collect();
            if !missing.is_empty() {
                println!("Faltan casillas: {}", missing.join(", "));
            }
            if !gate.has_evidence {
                println!("Falta la foto de evidencia");
            }
        }
    }
    println!("Avance: {}%", session.completion_percentage());
    Ok(())
}

fn show_timeline(session: &TrainingFlow) {
    let timeline = session.timeline();
    if timeline.is_empty() {
        println!("Seleccione un cultivo para ver el cronograma");
        return;
    }
    for entry in timeline {
        let mark = match entry.status {
            StepStatus::Completed => "✓",
            StepStatus::Current => ">",
            StepStatus::Locked => " ",
        };
        let done = entry.completed_at.map(|t| format!(" (completado {})", t.format("%d/%m/%Y"))).unwrap_or_default();
        println!("[{}] Días {:>3}-{:<3} {}{}", mark, entry.start_day, entry.end_day, entry.title, done);
    }
}

fn show_schemes(session: &TrainingFlow) {
    let schemes = session.eligible_schemes();
    if schemes.is_empty() {
        println!("Ningún esquema para {} acres", session.profile().land_area_acres());
        return;
    }
    for s in schemes {
        println!("- {} [{}] {}: {}", s.name, s.sponsor_type, s.eligibility_label, s.benefit_amount_label);
        println!("  Documentos: {}", s.required_documents.join(", "));
    }
}

fn write_certificate(session: &mut TrainingFlow) -> anyhow::Result<()> {
    let issued = session.generate_certificate(&HtmlCertificateRenderer::default())?;
    let dir = std::env::var("AGRI_CERT_DIR").unwrap_or_else(|_| ".".into());
    let path = Path::new(&dir).join(&issued.document.filename);
    std::fs::write(&path, &issued.document.bytes).with_context(|| format!("no se pudo escribir {}", path.display()))?;
    println!("Certificado {}{} escrito en {}",
             issued.record.certificate_id,
             if issued.reused { " (ya emitido)" } else { "" },
             path.display());
    Ok(())
}

async fn ask_advisor(advisory: &AdvisoryService) -> anyhow::Result<()> {
    let lang = prompt("Idioma (en/hi/or): ")?;
    let language = lang.trim().parse::<Language>().unwrap_or_default();
    println!("{}", language.welcome_message());
    let question = prompt("Pregunta: ")?;
    match advisory.advise(&question, language).await {
        Ok(advice) => {
            let tag = match advice.source {
                AdviceSource::Model => "asesor",
                AdviceSource::Fallback => "respuesta local",
            };
            println!("[{}] {}", tag, advice.text);
        }
        Err(e) => println!("{}", e),
    }
    Ok(())
}

async fn locate(session: &mut TrainingFlow, geocoder: &NominatimGeocoder) -> anyhow::Result<()> {
    let lat = prompt("Latitud: ")?;
    let lon = prompt("Longitud: ")?;
    let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) else {
        println!("Coordenadas inválidas");
        return Ok(());
    };
    match geocoder.reverse(lat, lon).await {
        Ok(address) => {
            session.edit_profile(|p| p.set_location(address.clone()))?;
            session.save()?;
            println!("Ubicación: {}", address);
        }
        Err(e) => println!("No se pudo obtener la ubicación: {}", e),
    }
    Ok(())
}

fn list_sessions(factory: &TrainingSessionFactory) -> anyhow::Result<()> {
    println!("\nID                                   | ESTADO              | NOMBRE");
    println!("-----------------------------------------------------------------------------------");
    for s in factory.list_sessions()? {
        println!("{} | {:<19} | {}",
                 s.id,
                 s.status.unwrap_or_else(|| "-".into()),
                 s.name.unwrap_or_else(|| "<sin nombre>".into()));
    }
    Ok(())
}

fn load_session(factory: &TrainingSessionFactory) -> anyhow::Result<Option<TrainingFlow>> {
    let id_s = prompt("Id de la sesión (UUID): ")?;
    let Ok(id) = Uuid::parse_str(id_s.trim()) else {
        println!("UUID inválido");
        return Ok(None);
    };
    Ok(Some(factory.load(&id)?))
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s)
}
