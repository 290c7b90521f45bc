//! Free-form reply generation
//!
//! When no template applies, the orchestrator asks the text-completion
//! collaborator for a reply. The prompt pair is assembled here: a persona
//! plus stage-specific guidance as the system prompt, the rendered
//! conversation as the user prompt.

use imobi_agent_core::{Error, Message, ReplyModel, ReplyRequest, Result};
use imobi_agent_funnel::FunnelStage;
use imobi_agent_interpreter::conversation_history;

const PERSONA: &str = "Você é o assistente virtual de uma imobiliária. Responda \
    em português, em tom cordial e direto, como uma conversa de WhatsApp. \
    Nunca invente imóveis nem valores; quando não souber, diga que vai \
    verificar com a equipe.";

/// Conversation guidance for each stage, fed to the reply model
pub fn stage_guidance(stage: FunnelStage) -> &'static str {
    match stage {
        FunnelStage::BoasVindas => {
            "Dê as boas-vindas e pergunte o que o cliente procura."
        }
        FunnelStage::ColetaDados => {
            "Colete o que falta entre orçamento, região e número de quartos. \
             Uma pergunta por vez."
        }
        FunnelStage::AguardandoInfo => {
            "Retome a conversa com leveza e repita a última pergunta pendente."
        }
        FunnelStage::Matching => {
            "Avise que está buscando opções compatíveis e peça um instante."
        }
        FunnelStage::Apresentacao => {
            "Comente os imóveis enviados e pergunte se algum chamou atenção."
        }
        FunnelStage::SemMatch => {
            "Explique que nada combinou ainda e proponha ajustar os critérios."
        }
        FunnelStage::Refinamento => {
            "Pergunte o que o cliente quer mudar: valor, região ou tamanho."
        }
        FunnelStage::Interesse => {
            "Aprofunde o interesse e ofereça agendar uma visita."
        }
        FunnelStage::Agendamento => {
            "Combine dia e horário da visita; confirme o endereço."
        }
        FunnelStage::VisitaAgendada => {
            "Confirme a visita marcada e fique à disposição para dúvidas."
        }
        FunnelStage::PosVisita => {
            "Pergunte como foi a visita e o que o cliente achou do imóvel."
        }
        FunnelStage::Negociacao => {
            "Dúvidas de valores e condições: encaminhe ao corretor responsável."
        }
        FunnelStage::Proposta => {
            "Informe que a proposta está com a equipe e dê o prazo de retorno."
        }
        FunnelStage::AnaliseCredito => {
            "Explique que a análise de crédito está em andamento."
        }
        FunnelStage::Documentacao => {
            "Oriente sobre os documentos pendentes listados pela equipe."
        }
        FunnelStage::Finalizacao => {
            "Parabenize pela conquista e se coloque à disposição."
        }
        FunnelStage::AtendimentoHumano => {
            "Um atendente humano assumiu; não responda pelo assistente."
        }
    }
}

/// Assemble the prompt pair for the current conversation
pub fn build_reply_request(stage: FunnelStage, messages: &[Message]) -> ReplyRequest {
    let system = format!("{}\n\nContexto da etapa: {}", PERSONA, stage_guidance(stage));
    ReplyRequest::new(system, conversation_history(messages))
}

/// Ask the collaborator for a free-form reply
pub async fn generate_reply(
    model: &dyn ReplyModel,
    stage: FunnelStage,
    messages: &[Message],
) -> Result<String> {
    if messages.is_empty() {
        return Err(Error::EmptyConversation);
    }
    model.complete(build_reply_request(stage, messages)).await
}
